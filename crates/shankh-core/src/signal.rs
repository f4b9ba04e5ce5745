//! Three-way presentation categories for prediction and sentiment cards.
//!
//! Both classifiers are total: out-of-contract input is logged and shown as
//! neutral so a bad upstream value never blocks the rest of the dashboard.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Directional category shared by every dashboard card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Neutral,
    Bearish,
}

impl Trend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Neutral => "neutral",
            Self::Bearish => "bearish",
        }
    }

    /// Gauge position: +1, 0 or -1.
    pub const fn score(self) -> i8 {
        match self {
            Self::Bullish => 1,
            Self::Neutral => 0,
            Self::Bearish => -1,
        }
    }
}

impl Display for Trend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a prediction signal (`1`, `0`, `-1`) to a trend.
pub fn classify_trend(signal: i64) -> Trend {
    match signal {
        1 => Trend::Bullish,
        0 => Trend::Neutral,
        -1 => Trend::Bearish,
        other => {
            tracing::warn!(
                signal = other,
                "prediction signal outside {{-1, 0, 1}}, showing neutral"
            );
            Trend::Neutral
        }
    }
}

/// Map a sentiment label (`Positive`, `Neutral`, `Negative`) to a trend.
///
/// Matching is exact; the label comes from a free-text model upstream.
pub fn classify_sentiment(label: &str) -> Trend {
    match label {
        "Positive" => Trend::Bullish,
        "Neutral" => Trend::Neutral,
        "Negative" => Trend::Bearish,
        other => {
            tracing::warn!(label = other, "unrecognized sentiment label, showing neutral");
            Trend::Neutral
        }
    }
}
