//! Data transfer objects shared by the HTTP API.

pub mod api;
