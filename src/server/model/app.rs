use sea_orm::DatabaseConnection;

use crate::server::config::Settings;

/// Shared application state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub settings: Settings,
}
