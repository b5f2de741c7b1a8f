//! Admin authentication: credential verification, failed-attempt lockout,
//! and session lifecycle.

pub mod lockout;
pub mod login;
pub mod password;

pub use lockout::LockoutPolicy;
pub use login::{logout, LoginOutcome, LoginService};
