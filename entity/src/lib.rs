pub mod prelude;

pub mod admin_user;
pub mod rate_limit;
pub mod registration;
pub mod security_log;
pub mod team_member;
