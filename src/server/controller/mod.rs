//! HTTP request handlers.

pub mod admin;
pub mod captcha;
pub mod registration;
pub mod util;
