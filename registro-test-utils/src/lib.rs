pub mod constant;
pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::{TestAppState, TestSetup};

pub mod prelude {
    pub use crate::{
        constant::{TEST_ADMIN_PASSWORD, TEST_ADMIN_USERNAME, TEST_CLIENT_IP},
        fixtures, test_setup_with_registration_tables, test_setup_with_tables, TestError,
        TestSetup,
    };
}
