//! Database repositories. Thin wrappers around sea-orm queries; business
//! rules live in the service layer.

pub mod admin_user;
pub mod rate_limit;
pub mod registration;
pub mod security_log;
pub mod team_member;

pub use admin_user::AdminUserRepository;
pub use rate_limit::RateLimitRepository;
pub use registration::{NewRegistration, NewTeamMember, RegistrationRepository};
pub use security_log::SecurityLogRepository;
pub use team_member::TeamMemberRepository;
