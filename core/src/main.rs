mod cors;

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use common::env_config::Config;
use db::{postgres::PgAccountStore, store::AccountStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();

    // get info
    let is_production = config.environment == "production";
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup().expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production)
        .await
        .expect("Failed to set up database");

    let store: Arc<dyn AccountStore> = Arc::new(PgAccountStore::new(pool));
    let store_data = web::Data::from(store);

    HttpServer::new(move || {
        App::new()
            .app_data(store_data.clone())
            .wrap(logger::middleware())
            .wrap(cors::middleware(&origin))
            .service(api_accounts::routes::health::get_health)
            .service(api_accounts::mount_auth())
            .service(api_accounts::mount_accounts())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
