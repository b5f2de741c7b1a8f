//! Registro: competition event registration platform.
//!
//! Public registration intake (validated multipart form with proof uploads,
//! captcha, and rate limiting) plus a session-gated admin dashboard for
//! reviewing submissions.

pub mod model;
pub mod server;
