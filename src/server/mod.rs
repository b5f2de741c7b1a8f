//! Server application core modules.
//!
//! This module contains all server-side functionality for Registro: HTTP
//! routing, the registration intake pipeline, admin authentication with
//! lockout, database repositories, and session state.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
