//! Shared constants for tests.

/// Username of the admin account created by the admin fixture.
pub static TEST_ADMIN_USERNAME: &str = "admin";

/// Plaintext password of the admin account created by the admin fixture.
/// Not a real credential.
pub static TEST_ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Client address used for submissions and security log assertions.
pub static TEST_CLIENT_IP: &str = "203.0.113.7";
