pub use super::admin_user::Entity as AdminUser;
pub use super::rate_limit::Entity as RateLimit;
pub use super::registration::Entity as Registration;
pub use super::security_log::Entity as SecurityLog;
pub use super::team_member::Entity as TeamMember;
