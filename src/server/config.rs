//! Environment-driven configuration.
//!
//! Only `DATABASE_URL` is required; everything else falls back to a
//! sensible default so a development instance starts with one variable set.

use std::path::PathBuf;
use std::str::FromStr;

use crate::server::error::config::ConfigError;
use crate::server::service::auth::lockout::LockoutPolicy;
use crate::server::service::rate_limit::RateLimitPolicy;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_UPLOAD_MAX_BYTES: u64 = 5 * 1024 * 1024;
const DEFAULT_MAX_LOGIN_ATTEMPTS: i32 = 5;
const DEFAULT_LOCKOUT_SECS: i64 = 30 * 60;
const DEFAULT_RATE_LIMIT_REQUESTS: u64 = 10;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: i64 = 60 * 60;

/// Raw configuration as read from the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub upload_dir: PathBuf,
    pub upload_max_bytes: u64,
    pub max_login_attempts: i32,
    pub lockout_secs: i64,
    pub rate_limit_requests: u64,
    pub rate_limit_window_secs: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require_var("DATABASE_URL")?,
            bind_address: var_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            upload_dir: PathBuf::from(var_or("UPLOAD_DIR", DEFAULT_UPLOAD_DIR)),
            upload_max_bytes: parse_var("UPLOAD_MAX_BYTES", DEFAULT_UPLOAD_MAX_BYTES)?,
            max_login_attempts: parse_var("MAX_LOGIN_ATTEMPTS", DEFAULT_MAX_LOGIN_ATTEMPTS)?,
            lockout_secs: parse_var("LOCKOUT_SECS", DEFAULT_LOCKOUT_SECS)?,
            rate_limit_requests: parse_var("RATE_LIMIT_REQUESTS", DEFAULT_RATE_LIMIT_REQUESTS)?,
            rate_limit_window_secs: parse_var(
                "RATE_LIMIT_WINDOW_SECS",
                DEFAULT_RATE_LIMIT_WINDOW_SECS,
            )?,
        })
    }
}

/// Runtime view of the configuration carried in application state.
/// Policies are pre-built so request handlers never re-parse anything.
#[derive(Clone, Debug)]
pub struct Settings {
    pub upload_dir: PathBuf,
    pub upload_max_bytes: u64,
    pub login: LockoutPolicy,
    pub rate_limit: RateLimitPolicy,
}

impl Settings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            upload_dir: config.upload_dir.clone(),
            upload_max_bytes: config.upload_max_bytes,
            login: LockoutPolicy::new(config.max_login_attempts, config.lockout_secs),
            rate_limit: RateLimitPolicy::new(
                config.rate_limit_requests,
                config.rate_limit_window_secs,
            ),
        }
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidEnvVar(name.to_string(), raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_carry_policies_from_config() {
        let config = Config {
            database_url: "postgres://localhost/registro".to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            upload_dir: PathBuf::from("/tmp/registro-uploads"),
            upload_max_bytes: 1024,
            max_login_attempts: 3,
            lockout_secs: 600,
            rate_limit_requests: 2,
            rate_limit_window_secs: 60,
        };

        let settings = Settings::from_config(&config);

        assert_eq!(settings.upload_max_bytes, 1024);
        assert_eq!(settings.login.max_attempts, 3);
        assert_eq!(settings.login.lockout.num_seconds(), 600);
        assert_eq!(settings.rate_limit.max_requests, 2);
        assert_eq!(settings.rate_limit.window.num_seconds(), 60);
    }
}
