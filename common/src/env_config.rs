use std::{env, sync::Arc};

/// Server configuration, read once at startup and shared behind an `Arc`.
///
/// Covers everything the binary needs to come up: the database URL, the
/// bind address, worker count, the allowed CORS origin and whether the
/// logger should be installed.
#[derive(Clone, Debug)]
pub struct Config {
    /// "development" or "production". Production requires TLS to the
    /// database.
    pub environment: String,
    /// Connection string of the Postgres database.
    pub database_url: String,
    /// Hostname or IP address the server binds to.
    pub server_host: String,
    /// Port the server listens on.
    pub server_port: u16,
    /// Number of worker threads handling requests.
    pub num_workers: usize,
    /// The origin allowed by the CORS middleware.
    pub cors_allowed_origin: String,
    /// Whether the console/file logger is installed at startup.
    pub console_logging_enabled: bool,
}

impl Config {
    /// Reads the configuration from the environment (a `.env` file is
    /// loaded first if present).
    ///
    /// `ENVIRONMENT` and `DATABASE_URL` are required. `IP` (127.0.0.1),
    /// `PORT` (8080), `WORKERS` (4), `CORS_ALLOWED_ORIGIN`
    /// (http://localhost:3000) and `ENABLE_CONSOLE_LOGGING` (true) fall
    /// back to their defaults.
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").expect("ENVIRONMENT must be set"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            server_host: var_or("IP", "127.0.0.1"),
            server_port: var_or("PORT", "8080").parse().unwrap_or(8080),
            num_workers: var_or("WORKERS", "4").parse().unwrap_or(4),
            cors_allowed_origin: var_or("CORS_ALLOWED_ORIGIN", "http://localhost:3000"),
            console_logging_enabled: var_or("ENABLE_CONSOLE_LOGGING", "true").to_lowercase()
                == "true",
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
