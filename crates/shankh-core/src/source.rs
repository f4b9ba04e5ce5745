use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The four independent data sources behind one ticker selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    PriceHistory,
    Prediction,
    Sentiment,
    Financials,
}

impl SourceKind {
    pub const ALL: [Self; 4] = [
        Self::PriceHistory,
        Self::Prediction,
        Self::Sentiment,
        Self::Financials,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceHistory => "price_history",
            Self::Prediction => "prediction",
            Self::Sentiment => "sentiment",
            Self::Financials => "financials",
        }
    }

    /// Human-readable name used in failure notices.
    pub const fn label(self) -> &'static str {
        match self {
            Self::PriceHistory => "stock data",
            Self::Prediction => "prediction",
            Self::Sentiment => "sentiment data",
            Self::Financials => "financial data",
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
