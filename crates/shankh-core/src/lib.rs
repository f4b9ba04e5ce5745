//! # Shankh Core
//!
//! Data core of the Shankh stock dashboard: fetch, combine and prepare one
//! ticker's market data for display.
//!
//! ## Overview
//!
//! - **Domain models** for price history, predictions, sentiment and financials
//! - **Source gateways** for the four dashboard services
//! - **Orchestrator** that fans a ticker selection out to every gateway and
//!   publishes only the newest selection's results
//! - **Series windower** for the 1M/3M/6M/1Y/ALL chart ranges
//! - **Signal mapper** turning prediction signals and sentiment labels into
//!   bullish/neutral/bearish categories
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Base URL, timeout and history settings with env overrides |
//! | [`domain`] | Domain models (Ticker, PriceSeries, Prediction, ...) |
//! | [`error`] | Validation errors |
//! | [`gateways`] | Per-source HTTP gateways and `FetchError` |
//! | [`http_client`] | HTTP client abstraction |
//! | [`orchestrator`] | Selection fan-out, epoch check and view publication |
//! | [`retry`] | Opt-in retry policy |
//! | [`signal`] | Trend classification |
//! | [`source`] | Source identifiers |
//! | [`view`] | Published view state and failure notices |
//! | [`windower`] | Time-window filtering and chart normalization |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shankh_core::{classify_trend, window, OrchestratorBuilder, Ticker, TimeWindow};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = OrchestratorBuilder::new().with_env()?.build()?;
//!     let outcome = orchestrator.select(Ticker::parse("INFY.NS")?).await;
//!
//!     if let Some(view) = outcome.view() {
//!         if let Ok(series) = &view.price_series {
//!             let today = time::OffsetDateTime::now_utc().date();
//!             let visible = window(series, TimeWindow::ThreeMonths, today);
//!             println!("{} points in view", visible.len());
//!         }
//!         if let Ok(prediction) = &view.prediction {
//!             println!("trend: {}", classify_trend(prediction.signal));
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / UI       │── select(ticker) ──┐
//! └────────┬────────┘                    ▼
//!          │                   ┌──────────────────┐
//!          │ subscribe()       │  Orchestrator    │
//!          │◀──────────────────│  (epoch check)   │
//!          │                   └────────┬─────────┘
//!          ▼                            │ join!
//! ┌─────────────────┐     ┌─────────────▼────────────┐
//! │ Windower /      │     │ Price │ Pred │ Sent │ Fin │
//! │ Signal mapper   │     └─────────────┬────────────┘
//! └─────────────────┘                   ▼
//!                              ┌──────────────────┐
//!                              │ HTTP Client      │
//!                              └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Gateway failures never abort a selection. Each lands in its own slot of
//! the [`ViewState`] as a [`FetchError`]:
//!
//! ```rust
//! use shankh_core::{FetchError, FetchErrorKind};
//!
//! fn describe(error: &FetchError) -> &'static str {
//!     match error.kind() {
//!         FetchErrorKind::Transport => "service unreachable",
//!         FetchErrorKind::Status { .. } => "service returned an error",
//!         FetchErrorKind::Malformed => "unexpected response",
//!     }
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod gateways;
pub mod http_client;
pub mod orchestrator;
pub mod retry;
pub mod signal;
pub mod source;
pub mod view;
pub mod windower;

// Configuration
pub use config::ShankhConfig;

// Domain models
pub use domain::{
    iso_date, FinancialSnapshot, HistoryInterval, HistoryPeriod, Prediction, PricePoint,
    PriceSeries, SentimentResult, Ticker, TimeWindow, Tweet,
};

// Error types
pub use error::ValidationError;

// Gateways
pub use gateways::{
    FetchError, FetchErrorKind, FetchFuture, FinancialsGateway, Gateway, GatewayTransport,
    PredictionGateway, PriceHistoryGateway, SentimentGateway,
};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse, ReqwestHttpClient,
};

// Orchestration
pub use orchestrator::{Gateways, Orchestrator, OrchestratorBuilder, SelectOutcome};

// Retry logic
pub use retry::{Backoff, RetryPolicy};

// Signal mapping
pub use signal::{classify_sentiment, classify_trend, Trend};

// Source identifiers
pub use source::SourceKind;

// View state
pub use view::{FetchNotice, ViewState};

// Windowing
pub use windower::{chart_points, cutoff, last_close, window, ChartPoint};
