pub mod admin;
pub mod file;
pub mod registration;
