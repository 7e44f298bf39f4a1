use std::fs::File;

use colored::Colorize;
use log::LevelFilter;
use middleware::logger::LoggerMiddleware;

pub mod middleware {
    pub mod logger;
}

const LOG_FILE: &str = "accounts.log";

/// Installs the fern dispatcher: colored per-level console output plus a
/// copy of everything in `accounts.log`. sqlx query tracing is silenced.
pub fn setup() -> Result<(), fern::InitError> {
    File::create(LOG_FILE).map_err(fern::InitError::Io)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            let level = record.level().to_string();
            let level = match record.level() {
                log::Level::Info => level.green(),
                log::Level::Warn => level.yellow(),
                log::Level::Error => level.red(),
                log::Level::Debug => level.magenta(),
                log::Level::Trace => level.bright_black(),
            };
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%H:%M:%S]"),
                record.target(),
                level,
                message
            ))
        })
        .level(LevelFilter::Debug)
        .level_for("sqlx::query", LevelFilter::Off)
        .chain(std::io::stdout())
        .chain(fern::log_file(LOG_FILE)?)
        .apply()?;
    Ok(())
}

pub fn middleware() -> LoggerMiddleware {
    LoggerMiddleware::new()
}
