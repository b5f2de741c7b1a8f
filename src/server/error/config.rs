use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Environment variable {0} has unparseable value {1:?}")]
    InvalidEnvVar(String, String),
}
