//! Source gateways for the four dashboard services.
//!
//! Each gateway turns a [`Ticker`] into one typed result and resolves every
//! failure into a [`FetchError`]; nothing panics or escapes as a transport
//! error past this boundary.
//!
//! | Gateway | Request | Output |
//! |---------|---------|--------|
//! | [`PriceHistoryGateway`] | `POST /fetch-data` | [`PriceSeries`](crate::PriceSeries) |
//! | [`PredictionGateway`] | `POST /next_day_pred` | [`Prediction`](crate::Prediction) |
//! | [`SentimentGateway`] | `GET /sentiment-and-tweets/{ticker}/` | [`SentimentResult`](crate::SentimentResult) |
//! | [`FinancialsGateway`] | `GET /get-financial-data/{ticker}` | [`FinancialSnapshot`](crate::FinancialSnapshot) |
//!
//! A gateway issues one request per call. Retries happen only when the
//! configured [`RetryPolicy`](crate::RetryPolicy) allows them.

mod financials;
mod prediction;
mod price_history;
mod sentiment;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::ShankhConfig;
use crate::http_client::{HttpClient, HttpError, HttpRequest};
use crate::source::SourceKind;
use crate::Ticker;

pub use financials::FinancialsGateway;
pub use prediction::PredictionGateway;
pub use price_history::PriceHistoryGateway;
pub use sentiment::SentimentGateway;

const MAX_CAUSE_CHARS: usize = 512;

/// Failure category of a gateway call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// The request never produced an HTTP response.
    Transport,
    /// The service answered with a non-2xx status.
    Status { code: u16 },
    /// The body could not be decoded into the expected record.
    Malformed,
}

/// Structured per-source failure stored in a view slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    source_kind: SourceKind,
    kind: FetchErrorKind,
    message: String,
    cause: String,
}

impl FetchError {
    pub fn transport(source_kind: SourceKind, error: &HttpError) -> Self {
        Self {
            source_kind,
            kind: FetchErrorKind::Transport,
            message: format!("could not reach the {} service", source_kind.label()),
            cause: error.message().to_owned(),
        }
    }

    /// Non-2xx response. A FastAPI `detail` field, when present, becomes the message.
    pub fn status(source_kind: SourceKind, code: u16, body: &str) -> Self {
        let message = match error_detail(body) {
            Some(detail) => format!(
                "{} request failed with HTTP {code}: {detail}",
                source_kind.label()
            ),
            None => format!("{} request failed with HTTP {code}", source_kind.label()),
        };

        Self {
            source_kind,
            kind: FetchErrorKind::Status { code },
            message,
            cause: truncate_chars(body, MAX_CAUSE_CHARS),
        }
    }

    pub fn malformed(source_kind: SourceKind, cause: impl Into<String>) -> Self {
        Self {
            source_kind,
            kind: FetchErrorKind::Malformed,
            message: format!("{} response could not be decoded", source_kind.label()),
            cause: cause.into(),
        }
    }

    pub const fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw underlying error text, for logs only.
    pub fn cause(&self) -> &str {
        &self.cause
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::Status { .. } => "fetch.status",
            FetchErrorKind::Malformed => "fetch.malformed",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Boxed future returned by [`Gateway::fetch`].
pub type FetchFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, FetchError>> + Send + 'a>>;

/// Uniform contract implemented by every source gateway.
pub trait Gateway: Send + Sync {
    type Output: Send;

    fn source_kind(&self) -> SourceKind;

    fn fetch<'a>(&'a self, ticker: &'a Ticker) -> FetchFuture<'a, Self::Output>;
}

/// Shared HTTP plumbing: base URL, timeout and the optional retry loop.
#[derive(Clone)]
pub struct GatewayTransport {
    http_client: Arc<dyn HttpClient>,
    config: Arc<ShankhConfig>,
}

impl GatewayTransport {
    pub fn new(http_client: Arc<dyn HttpClient>, config: ShankhConfig) -> Self {
        Self {
            http_client,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ShankhConfig {
        &self.config
    }

    pub fn endpoint(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    /// Execute `request` and return the body of the first 2xx response.
    pub async fn send(
        &self,
        source_kind: SourceKind,
        request: HttpRequest,
    ) -> Result<String, FetchError> {
        let request = request.with_timeout_ms(self.config.timeout_ms);
        let retry = &self.config.retry;
        let mut attempt = 0_u32;

        loop {
            let (error, retryable) = match self.http_client.execute(request.clone()).await {
                Ok(response) if response.is_success() => return Ok(response.body),
                Ok(response) => (
                    FetchError::status(source_kind, response.status, &response.body),
                    retry.should_retry_status(response.status),
                ),
                Err(error) => (
                    FetchError::transport(source_kind, &error),
                    retry.retry_on_transport && error.retryable(),
                ),
            };

            if !retryable || !retry.allows_retry(attempt) {
                return Err(error);
            }

            let delay = retry.delay_for_attempt(attempt);
            tracing::debug!(
                source = %source_kind,
                attempt = attempt + 1,
                code = error.code(),
                delay_ms = delay.as_millis() as u64,
                "retrying gateway request"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    source_kind: SourceKind,
    body: &str,
) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::malformed(source_kind, e.to_string()))
}

fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn truncate_chars(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &input[..index]),
        None => input.to_owned(),
    }
}
