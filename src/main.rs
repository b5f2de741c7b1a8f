use std::net::SocketAddr;

use registro::server::config::{Config, Settings};
use registro::server::model::app::AppState;
use registro::server::{router, startup};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Configuration error: {error}");
            std::process::exit(1);
        }
    };

    if let Err(error) = startup::prepare_upload_root(&config) {
        tracing::error!("Failed to prepare upload directory: {error}");
        std::process::exit(1);
    }

    let db = match startup::connect_to_database(&config).await {
        Ok(db) => db,
        Err(error) => {
            tracing::error!("Failed to connect to database: {error}");
            std::process::exit(1);
        }
    };

    let settings = Settings::from_config(&config);
    let app = router::routes()
        .with_state(AppState { db, settings })
        .layer(startup::session_layer());

    let listener = match tokio::net::TcpListener::bind(&config.bind_address).await {
        Ok(listener) => listener,
        Err(error) => {
            tracing::error!("Failed to bind {}: {error}", config.bind_address);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", config.bind_address);

    if let Err(error) =
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
    {
        tracing::error!("Server error: {error}");
        std::process::exit(1);
    }
}
