//! Runtime configuration for the gateways.
//!
//! # Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SHANKH_API_BASE_URL` | `http://localhost:8000` | Root of the dashboard services |
//! | `SHANKH_TIMEOUT_MS` | `10000` | Per-request timeout |
//! | `SHANKH_HISTORY_PERIOD` | `1y` | Price history lookback |
//! | `SHANKH_HISTORY_INTERVAL` | `1d` | Price history bar spacing |
//! | `SHANKH_MAX_RETRIES` | `0` | Extra attempts per gateway request |

use std::env;
use std::str::FromStr;

use crate::retry::RetryPolicy;
use crate::{HistoryInterval, HistoryPeriod, ValidationError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const BASE_URL_ENV: &str = "SHANKH_API_BASE_URL";
pub const TIMEOUT_ENV: &str = "SHANKH_TIMEOUT_MS";
pub const HISTORY_PERIOD_ENV: &str = "SHANKH_HISTORY_PERIOD";
pub const HISTORY_INTERVAL_ENV: &str = "SHANKH_HISTORY_INTERVAL";
pub const MAX_RETRIES_ENV: &str = "SHANKH_MAX_RETRIES";

/// Settings shared by the four gateways.
#[derive(Debug, Clone, PartialEq)]
pub struct ShankhConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub history_period: HistoryPeriod,
    pub history_interval: HistoryInterval,
    pub retry: RetryPolicy,
}

impl Default for ShankhConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            history_period: HistoryPeriod::default(),
            history_interval: HistoryInterval::default(),
            retry: RetryPolicy::none(),
        }
    }
}

impl ShankhConfig {
    /// Defaults overridden by any `SHANKH_*` variables present in the process environment.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::default().with_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.base_url = base_url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.timeout_ms = parse_number(TIMEOUT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(HISTORY_PERIOD_ENV) {
            self.history_period = HistoryPeriod::from_str(&raw)?;
        }
        if let Some(raw) = lookup(HISTORY_INTERVAL_ENV) {
            self.history_interval = HistoryInterval::from_str(&raw)?;
        }
        if let Some(raw) = lookup(MAX_RETRIES_ENV) {
            let max_retries = parse_number(MAX_RETRIES_ENV, &raw)?;
            self.retry = RetryPolicy {
                max_retries,
                ..self.retry
            };
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let base_url = self.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl {
                value: self.base_url.clone(),
            });
        }
        if self.timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        Ok(())
    }

    /// Join `path` onto the base URL with exactly one separating slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn parse_number<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse()
        .map_err(|_| ValidationError::InvalidEnvValue {
            name,
            value: raw.to_owned(),
        })
}
