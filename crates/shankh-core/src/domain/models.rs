use serde::{Deserialize, Serialize};
use time::Date;

use crate::Ticker;

/// One daily observation of a price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Carried through from the source, never read by the windower.
    pub dividends: f64,
    /// Carried through from the source, never read by the windower.
    pub stock_splits: f64,
}

/// Ordered price history for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: Ticker,
    pub status: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(ticker: Ticker, status: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            ticker,
            status: status.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_date(&self) -> Option<Date> {
        self.points.last().map(|point| point.date)
    }
}

/// Next-session close prediction.
///
/// `signal` is authoritative for direction. The price delta is display-only
/// and never used to re-derive it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub ticker: Ticker,
    pub previous_close: f64,
    pub predicted_close: f64,
    pub signal: i64,
}

impl Prediction {
    pub fn change(&self) -> f64 {
        self.predicted_close - self.previous_close
    }

    /// Predicted move relative to the previous close, in percent.
    pub fn percent_change(&self) -> Option<f64> {
        if self.previous_close == 0.0 || !self.previous_close.is_finite() {
            return None;
        }
        Some(self.change() / self.previous_close * 100.0)
    }
}

/// Social post attached to a sentiment reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub author: String,
    pub text: String,
    pub created_at: String,
    pub url: Option<String>,
}

/// Aggregated social sentiment for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub ticker: Ticker,
    /// Informational only; `signal_label` drives classification.
    pub sentiment_score: f64,
    pub signal_label: String,
    pub tweets: Vec<Tweet>,
    /// Upstream status note, e.g. when no posts were found.
    pub message: Option<String>,
}

/// Latest reported income statement figures.
///
/// Any figure the upstream statement lacks is `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub ticker: Ticker,
    pub report_date: Option<String>,
    pub total_revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub ebitda: Option<f64>,
    pub gross_profit: Option<f64>,
    pub operating_income: Option<f64>,
    pub operating_expense: Option<f64>,
    pub interest_expense: Option<f64>,
    pub pretax_income: Option<f64>,
    pub tax_provision: Option<f64>,
    pub diluted_eps: Option<f64>,
    pub basic_eps: Option<f64>,
}

/// Serde adapter for `YYYY-MM-DD` calendar dates.
pub mod iso_date {
    use serde::de::Error as DeError;
    use serde::{Deserialize, Deserializer, Serializer};
    use time::format_description::BorrowedFormatItem;
    use time::macros::format_description;
    use time::Date;

    use crate::ValidationError;

    const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

    pub fn format(date: Date) -> String {
        date.format(FORMAT)
            .unwrap_or_else(|_| String::from("<unformattable>"))
    }

    /// Parse the calendar date prefix of an ISO date or RFC3339 timestamp.
    pub fn parse(input: &str) -> Result<Date, ValidationError> {
        let trimmed = input.trim();
        let prefix = trimmed.get(..10).unwrap_or(trimmed);
        Date::parse(prefix, FORMAT).map_err(|_| ValidationError::InvalidDate {
            value: input.to_owned(),
        })
    }

    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        parse(&value).map_err(D::Error::custom)
    }
}
