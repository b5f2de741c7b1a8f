//! Helpers shared across controllers.

pub mod csrf;
pub mod get_admin;

pub use csrf::{issue_csrf, rotate_csrf, validate_csrf};
pub use get_admin::require_admin;
