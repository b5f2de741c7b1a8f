//! Typed wrappers over session keys.
//!
//! Each wrapper owns one session key and the serialization behind it so
//! handlers never touch raw keys or untyped session values.

pub mod admin;
pub mod captcha;
pub mod csrf;
pub mod notice;

pub use admin::SessionAdmin;
pub use captcha::SessionCaptcha;
pub use csrf::SessionCsrfToken;
pub use notice::SessionLogoutNotice;
