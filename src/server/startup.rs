//! Startup wiring: database connection, migrations, session layer, and
//! the upload root.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::server::config::Config;
use crate::server::error::Error;

pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut options = ConnectOptions::new(&config.database_url);
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;

    Ok(db)
}

/// In-memory session store; sessions do not survive a restart.
pub fn session_layer() -> SessionManagerLayer<MemoryStore> {
    let development_mode = cfg!(debug_assertions);

    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(!development_mode)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::hours(2)))
}

pub fn prepare_upload_root(config: &Config) -> Result<(), Error> {
    std::fs::create_dir_all(&config.upload_dir)?;

    Ok(())
}
