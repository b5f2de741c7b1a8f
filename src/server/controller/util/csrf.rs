//! CSRF token issuance and verification.

use rand::Rng;
use subtle::ConstantTimeEq;
use tower_sessions::Session;

use crate::server::error::auth::AuthError;
use crate::server::error::Error;
use crate::server::model::session::SessionCsrfToken;

fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// Returns the session's token, minting one on first use.
pub async fn issue_csrf(session: &Session) -> Result<String, Error> {
    if let Some(token) = SessionCsrfToken::get(session).await? {
        return Ok(token);
    }

    let token = generate_token();
    SessionCsrfToken::insert(session, &token).await?;

    Ok(token)
}

/// Replaces the session's token so a captured form value cannot be
/// replayed. Used after failed logins.
pub async fn rotate_csrf(session: &Session) -> Result<String, Error> {
    let token = generate_token();
    SessionCsrfToken::insert(session, &token).await?;

    Ok(token)
}

/// Constant-time comparison against the session's token. A missing
/// session token fails the same way a mismatch does.
pub async fn validate_csrf(session: &Session, submitted: &str) -> Result<(), Error> {
    if let Some(stored) = SessionCsrfToken::get(session).await? {
        if bool::from(stored.as_bytes().ct_eq(submitted.as_bytes())) {
            return Ok(());
        }
    }

    Err(AuthError::CsrfValidationFailed.into())
}
