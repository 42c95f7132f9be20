use thiserror::Error;

/// Errors raised while loading [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised when parsing user-facing selections.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown country: {0} (expected one of KR, US, JP)")]
    UnknownCountry(String),

    #[error("unknown look-back period: {0} (expected day, week, month or year)")]
    UnknownPeriod(String),
}
