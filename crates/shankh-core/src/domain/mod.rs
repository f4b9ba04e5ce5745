//! # Domain Models
//!
//! Canonical types for one ticker's dashboard data.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Case-sensitive instrument identifier |
//! | [`PricePoint`] | One daily OHLCV observation |
//! | [`PriceSeries`] | Ordered price history for a ticker |
//! | [`Prediction`] | Next-session close prediction and trading signal |
//! | [`SentimentResult`] | Social sentiment label, score, and posts |
//! | [`FinancialSnapshot`] | Latest income statement figures |
//! | [`TimeWindow`] | Visible chart range (1M, 3M, 6M, 1Y, ALL) |
//! | [`HistoryPeriod`] / [`HistoryInterval`] | Price history request parameters |
//!
//! Wire payloads are decoded by the gateways and normalized into these
//! types; nothing here performs I/O.

mod history_params;
mod models;
mod ticker;
mod time_window;

pub use history_params::{HistoryInterval, HistoryPeriod};
pub use models::{
    iso_date, FinancialSnapshot, Prediction, PricePoint, PriceSeries, SentimentResult, Tweet,
};
pub use ticker::Ticker;
pub use time_window::TimeWindow;
