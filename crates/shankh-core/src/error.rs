use thiserror::Error;

/// Validation and contract errors exposed by `shankh-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("ticker cannot be empty")]
    EmptyTicker,

    #[error("invalid time window '{value}', expected one of 1M, 3M, 6M, 1Y, ALL")]
    InvalidTimeWindow { value: String },
    #[error("invalid history period '{value}', expected one of 1mo, 3mo, 6mo, 1y, 2y, 5y, max")]
    InvalidHistoryPeriod { value: String },
    #[error("invalid history interval '{value}', expected one of 1d, 1wk, 1mo")]
    InvalidHistoryInterval { value: String },

    #[error("base url must start with http:// or https://: '{value}'")]
    InvalidBaseUrl { value: String },
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("environment variable {name} has invalid value '{value}'")]
    InvalidEnvValue { name: &'static str, value: String },

    #[error("date must be formatted as YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
}
