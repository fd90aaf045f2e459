use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod db;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();

    let state = AppState::new(&config)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let db_pool = web::Data::from(state.db_pool.clone());
    let ticket_repository = web::Data::new(state.ticket_repository.clone());
    let classification_service = web::Data::from(state.classification_service.clone());

    tracing::info!(addr = %bind_addr, "Starting ticket triage service");

    HttpServer::new(move || {
        App::new()
            .app_data(db_pool.clone())
            .app_data(ticket_repository.clone())
            .app_data(classification_service.clone())
            .configure(api::ticket::configure)
            .configure(api::classify::configure)
            .configure(api::health::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
