use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_ADMIN_KEY: &str = "registro:admin";

/// Authenticated admin identity established by a successful login.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAdmin {
    pub admin_id: i32,
    pub username: String,
    pub full_name: String,
    pub role: String,
}

impl SessionAdmin {
    pub async fn insert(session: &Session, admin: &SessionAdmin) -> Result<(), Error> {
        session.insert(SESSION_ADMIN_KEY, admin).await?;

        Ok(())
    }

    pub async fn get(session: &Session) -> Result<Option<SessionAdmin>, Error> {
        Ok(session.get(SESSION_ADMIN_KEY).await?)
    }
}
