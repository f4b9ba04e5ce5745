use crate::gateways::FetchError;
use crate::source::SourceKind;
use crate::{FinancialSnapshot, Prediction, PriceSeries, SentimentResult, Ticker};

/// Consolidated result of one published selection.
///
/// Each slot settles independently; a failed source never hides the others.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub ticker: Ticker,
    pub price_series: Result<PriceSeries, FetchError>,
    pub prediction: Result<Prediction, FetchError>,
    pub sentiment: Result<SentimentResult, FetchError>,
    pub financials: Result<FinancialSnapshot, FetchError>,
    pub request_epoch: u64,
}

impl ViewState {
    /// Failed slots in [`SourceKind::ALL`] order.
    pub fn failures(&self) -> Vec<(SourceKind, &FetchError)> {
        [
            (SourceKind::PriceHistory, self.price_series.as_ref().err()),
            (SourceKind::Prediction, self.prediction.as_ref().err()),
            (SourceKind::Sentiment, self.sentiment.as_ref().err()),
            (SourceKind::Financials, self.financials.as_ref().err()),
        ]
        .into_iter()
        .filter_map(|(source, error)| error.map(|error| (source, error)))
        .collect()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().len()
    }

    pub fn is_complete(&self) -> bool {
        self.failure_count() == 0
    }

    /// Every source failed; the page has nothing to show.
    pub fn all_failed(&self) -> bool {
        self.failure_count() == SourceKind::ALL.len()
    }
}

/// One failed source of a published selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchNotice {
    pub ticker: Ticker,
    pub source: SourceKind,
    pub error: FetchError,
}

impl FetchNotice {
    /// User-facing line, e.g. `failed to load sentiment data for ITC.NS`.
    pub fn summary(&self) -> String {
        format!("failed to load {} for {}", self.source.label(), self.ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::HttpError;

    fn failed(source: SourceKind) -> FetchError {
        FetchError::transport(source, &HttpError::new("down"))
    }

    fn empty_view(ticker: &Ticker) -> ViewState {
        ViewState {
            ticker: ticker.clone(),
            price_series: Ok(PriceSeries::new(ticker.clone(), "success", Vec::new())),
            prediction: Err(failed(SourceKind::Prediction)),
            sentiment: Err(failed(SourceKind::Sentiment)),
            financials: Err(failed(SourceKind::Financials)),
            request_epoch: 7,
        }
    }

    #[test]
    fn failures_are_listed_in_source_order() {
        let ticker = Ticker::parse("SBIN.NS").expect("valid ticker");
        let view = empty_view(&ticker);

        let sources: Vec<SourceKind> = view.failures().into_iter().map(|(s, _)| s).collect();
        assert_eq!(
            sources,
            vec![
                SourceKind::Prediction,
                SourceKind::Sentiment,
                SourceKind::Financials
            ]
        );
        assert!(!view.all_failed());
        assert!(!view.is_complete());
    }

    #[test]
    fn all_failed_requires_every_slot() {
        let ticker = Ticker::parse("SBIN.NS").expect("valid ticker");
        let mut view = empty_view(&ticker);
        view.price_series = Err(failed(SourceKind::PriceHistory));

        assert!(view.all_failed());
        assert_eq!(view.failure_count(), 4);
    }

    #[test]
    fn notice_summary_names_source_and_ticker() {
        let notice = FetchNotice {
            ticker: Ticker::parse("ITC.NS").expect("valid ticker"),
            source: SourceKind::Sentiment,
            error: failed(SourceKind::Sentiment),
        };

        assert_eq!(notice.summary(), "failed to load sentiment data for ITC.NS");
    }
}
