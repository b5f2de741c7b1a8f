//! Business logic. Controllers call into here; this layer calls the
//! repositories in `data` and never touches HTTP types.

pub mod auth;
pub mod captcha;
pub mod dashboard;
pub mod rate_limit;
pub mod registration;
pub mod security_log;
pub mod upload;
pub mod validation;
