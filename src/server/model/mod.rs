//! Server-side models: application state, form parsing, session wrappers.

pub mod app;
pub mod form;
pub mod session;
