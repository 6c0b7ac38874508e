use fyyur_db::AppState;
use fyyur_migration::{Migrator, MigratorTrait};
use fyyur_server::config::ServerConfig;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    fyyur_server::logging::init(config.log_file.as_deref()).expect("failed to open log file");

    // Database connection
    let db_config = fyyur_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = fyyur_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    tracing::info!("running database migrations...");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let app = fyyur_server::router(Arc::new(AppState { db }));

    let addr = config.addr();
    tracing::info!(%addr, "server started");

    axum::serve(
        tokio::net::TcpListener::bind(addr)
            .await
            .expect("failed to bind address"),
        app,
    )
    .await
    .expect("server error");
}
