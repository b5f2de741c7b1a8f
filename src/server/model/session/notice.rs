use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_LOGOUT_NOTICE_KEY: &str = "registro:logout_notice";

/// One-time farewell message shown on the first page view after logout.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionLogoutNotice(pub String);

impl SessionLogoutNotice {
    pub async fn insert(session: &Session, message: &str) -> Result<(), Error> {
        session
            .insert(SESSION_LOGOUT_NOTICE_KEY, SessionLogoutNotice(message.to_string()))
            .await?;

        Ok(())
    }

    pub async fn take(session: &Session) -> Result<Option<String>, Error> {
        let notice: Option<SessionLogoutNotice> =
            session.remove(SESSION_LOGOUT_NOTICE_KEY).await?;

        Ok(notice.map(|notice| notice.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_test_utils::prelude::*;

    mod take {
        use super::*;

        #[tokio::test]
        async fn consumes_notice_on_first_read() -> Result<(), TestError> {
            let test = TestSetup::new().await?;

            SessionLogoutNotice::insert(&test.session, "You have been successfully logged out.")
                .await
                .unwrap();

            let first = SessionLogoutNotice::take(&test.session).await.unwrap();
            let second = SessionLogoutNotice::take(&test.session).await.unwrap();

            assert_eq!(
                first,
                Some("You have been successfully logged out.".to_string())
            );
            assert_eq!(second, None);

            Ok(())
        }
    }
}
