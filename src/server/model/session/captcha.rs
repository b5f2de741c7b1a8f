use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_CAPTCHA_KEY: &str = "registro:captcha";

/// Expected captcha code for this session. Consumed on verification so a
/// code can never be replayed.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionCaptcha(pub String);

impl SessionCaptcha {
    pub async fn insert(session: &Session, code: &str) -> Result<(), Error> {
        session
            .insert(SESSION_CAPTCHA_KEY, SessionCaptcha(code.to_string()))
            .await?;

        Ok(())
    }

    /// Removes and returns the stored code in one step.
    pub async fn take(session: &Session) -> Result<Option<String>, Error> {
        let code: Option<SessionCaptcha> = session.remove(SESSION_CAPTCHA_KEY).await?;

        Ok(code.map(|code| code.0))
    }
}
