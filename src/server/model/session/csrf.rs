use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_CSRF_KEY: &str = "registro:csrf";

/// The per-session CSRF token required on state-changing submissions.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionCsrfToken(pub String);

impl SessionCsrfToken {
    pub async fn insert(session: &Session, token: &str) -> Result<(), Error> {
        session
            .insert(SESSION_CSRF_KEY, SessionCsrfToken(token.to_string()))
            .await?;

        Ok(())
    }

    pub async fn get(session: &Session) -> Result<Option<String>, Error> {
        let token: Option<SessionCsrfToken> = session.get(SESSION_CSRF_KEY).await?;

        Ok(token.map(|token| token.0))
    }
}
