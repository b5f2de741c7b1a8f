use tower_sessions::Session;

use crate::server::error::auth::AuthError;
use crate::server::error::Error;
use crate::server::model::session::SessionAdmin;

/// Fetches the authenticated admin identity or fails with 401.
pub async fn require_admin(session: &Session) -> Result<SessionAdmin, Error> {
    SessionAdmin::get(session)
        .await?
        .ok_or_else(|| AuthError::NotAuthenticated.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_test_utils::prelude::*;

    #[tokio::test]
    async fn rejects_anonymous_session() -> Result<(), TestError> {
        let test = TestSetup::new().await?;

        let result = require_admin(&test.session).await;
        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::NotAuthenticated))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn returns_stored_identity() -> Result<(), TestError> {
        let test = TestSetup::new().await?;

        let identity = SessionAdmin {
            admin_id: 7,
            username: TEST_ADMIN_USERNAME.to_string(),
            full_name: "Test Admin".to_string(),
            role: "admin".to_string(),
        };
        SessionAdmin::insert(&test.session, &identity).await.unwrap();

        let admin = require_admin(&test.session).await.unwrap();
        assert_eq!(admin, identity);

        Ok(())
    }
}
