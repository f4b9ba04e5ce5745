use serde::Serialize;
use time::{Date, OffsetDateTime};

use shankh_core::{
    chart_points, classify_sentiment, classify_trend, cutoff, iso_date, last_close, window,
    ChartPoint, FetchError, FetchNotice, FinancialSnapshot, Orchestrator, Prediction,
    PriceSeries, SelectOutcome, SentimentResult, SourceKind, Ticker, TimeWindow, Trend, Tweet,
    ViewState,
};

use crate::cli::SelectArgs;
use crate::error::CliError;

/// Loaded data or the reason it is missing.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Loaded { data: T },
    Failed { code: &'static str, message: String },
}

impl<T> Section<T> {
    fn from_slot<U>(slot: &Result<U, FetchError>, build: impl FnOnce(&U) -> T) -> Self {
        match slot {
            Ok(value) => Self::Loaded { data: build(value) },
            Err(error) => Self::Failed {
                code: error.code(),
                message: error.message().to_owned(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChartSection {
    pub status: String,
    pub window: TimeWindow,
    pub cutoff: Option<String>,
    pub total_points: usize,
    pub last_close: Option<f64>,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Serialize)]
pub struct PredictionSection {
    pub previous_close: f64,
    pub predicted_close: f64,
    pub change: f64,
    pub percent_change: Option<f64>,
    pub signal: i64,
    pub trend: Trend,
}

#[derive(Debug, Serialize)]
pub struct SentimentSection {
    pub label: String,
    pub score: f64,
    pub trend: Trend,
    pub gauge: i8,
    pub message: Option<String>,
    /// Posts returned by the service, before the `--tweets` limit.
    pub total_tweets: usize,
    pub tweets: Vec<Tweet>,
}

#[derive(Debug, Serialize)]
pub struct FailureLine {
    pub source: SourceKind,
    pub code: &'static str,
    pub summary: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SelectionReport {
    pub ticker: Ticker,
    pub request_epoch: u64,
    pub as_of: String,
    pub chart: Section<ChartSection>,
    pub prediction: Section<PredictionSection>,
    pub sentiment: Section<SentimentSection>,
    pub financials: Section<FinancialSnapshot>,
    pub failures: Vec<FailureLine>,
}

impl SelectionReport {
    pub fn all_failed(&self) -> bool {
        self.failures.len() == SourceKind::ALL.len()
    }
}

pub async fn run(args: &SelectArgs, orchestrator: &Orchestrator) -> Result<SelectionReport, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let now = match &args.now {
        Some(raw) => iso_date::parse(raw)?,
        None => OffsetDateTime::now_utc().date(),
    };

    let mut notices = orchestrator.notices();
    let view = match orchestrator.select(ticker).await {
        SelectOutcome::Published(view) => view,
        SelectOutcome::Discarded { latest_epoch, .. } => {
            return Err(CliError::Command(format!(
                "selection was superseded by request {latest_epoch}"
            )));
        }
    };

    let mut received = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        received.push(notice);
    }

    Ok(build_report(&view, &received, args.window, now, args.tweets))
}

pub fn build_report(
    view: &ViewState,
    notices: &[FetchNotice],
    range: TimeWindow,
    now: Date,
    tweet_limit: usize,
) -> SelectionReport {
    SelectionReport {
        ticker: view.ticker.clone(),
        request_epoch: view.request_epoch,
        as_of: iso_date::format(now),
        chart: Section::from_slot(&view.price_series, |series| chart_section(series, range, now)),
        prediction: Section::from_slot(&view.prediction, prediction_section),
        sentiment: Section::from_slot(&view.sentiment, |sentiment| {
            sentiment_section(sentiment, tweet_limit)
        }),
        financials: Section::from_slot(&view.financials, FinancialSnapshot::clone),
        failures: notices
            .iter()
            .map(|notice| FailureLine {
                source: notice.source,
                code: notice.error.code(),
                summary: notice.summary(),
                message: notice.error.message().to_owned(),
            })
            .collect(),
    }
}

fn chart_section(series: &PriceSeries, range: TimeWindow, now: Date) -> ChartSection {
    let visible = window(series, range, now);

    ChartSection {
        status: series.status.clone(),
        window: range,
        cutoff: cutoff(range, now).map(iso_date::format),
        total_points: series.len(),
        last_close: last_close(&visible),
        points: chart_points(&visible),
    }
}

fn prediction_section(prediction: &Prediction) -> PredictionSection {
    PredictionSection {
        previous_close: prediction.previous_close,
        predicted_close: prediction.predicted_close,
        change: prediction.change(),
        percent_change: prediction.percent_change(),
        signal: prediction.signal,
        trend: classify_trend(prediction.signal),
    }
}

fn sentiment_section(sentiment: &SentimentResult, tweet_limit: usize) -> SentimentSection {
    let trend = classify_sentiment(&sentiment.signal_label);

    SentimentSection {
        label: sentiment.signal_label.clone(),
        score: sentiment.sentiment_score,
        trend,
        gauge: trend.score(),
        message: sentiment.message.clone(),
        total_tweets: sentiment.tweets.len(),
        tweets: sentiment.tweets.iter().take(tweet_limit).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shankh_core::{HttpError, PricePoint};
    use time::macros::date;

    fn ticker() -> Ticker {
        Ticker::parse("ITC.NS").expect("valid ticker")
    }

    fn point(date: Date, close: f64) -> PricePoint {
        PricePoint {
            date,
            open: 400.0,
            high: close.max(400.0),
            low: close.min(400.0),
            close,
            volume: 1_000,
            dividends: 0.0,
            stock_splits: 0.0,
        }
    }

    fn view_with_failed_sentiment() -> (ViewState, FetchNotice) {
        let error = FetchError::transport(SourceKind::Sentiment, &HttpError::new("refused"));
        let view = ViewState {
            ticker: ticker(),
            price_series: Ok(PriceSeries::new(
                ticker(),
                "success",
                vec![
                    point(date!(2025 - 01 - 10), 401.0),
                    point(date!(2025 - 03 - 03), 410.0),
                    point(date!(2025 - 03 - 28), 398.5),
                ],
            )),
            prediction: Ok(Prediction {
                ticker: ticker(),
                previous_close: 400.0,
                predicted_close: 420.0,
                signal: 1,
            }),
            sentiment: Err(error.clone()),
            financials: Ok(FinancialSnapshot {
                ticker: ticker(),
                report_date: Some(String::from("2024-03-31")),
                total_revenue: Some(7.0e11),
                net_income: None,
                ebitda: None,
                gross_profit: None,
                operating_income: None,
                operating_expense: None,
                interest_expense: None,
                pretax_income: None,
                tax_provision: None,
                diluted_eps: Some(16.4),
                basic_eps: None,
            }),
            request_epoch: 3,
        };
        let notice = FetchNotice {
            ticker: ticker(),
            source: SourceKind::Sentiment,
            error,
        };
        (view, notice)
    }

    #[test]
    fn report_windows_chart_and_classifies_prediction() {
        let (view, notice) = view_with_failed_sentiment();

        let report = build_report(&view, &[notice], TimeWindow::OneMonth, date!(2025 - 03 - 31), 5);

        match &report.chart {
            Section::Loaded { data } => {
                assert_eq!(data.total_points, 3);
                assert_eq!(data.points.len(), 2);
                assert_eq!(data.cutoff.as_deref(), Some("2025-03-01"));
                assert_eq!(data.last_close, Some(398.5));
            }
            Section::Failed { .. } => panic!("chart should load"),
        }
        match &report.prediction {
            Section::Loaded { data } => {
                assert_eq!(data.trend, Trend::Bullish);
                let percent = data.percent_change.expect("non-zero previous close");
                assert!((percent - 5.0).abs() < 1e-9);
            }
            Section::Failed { .. } => panic!("prediction should load"),
        }
        assert!(matches!(
            report.sentiment,
            Section::Failed { code: "fetch.transport", .. }
        ));
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].summary, "failed to load sentiment data for ITC.NS");
        assert!(!report.all_failed());
    }

    #[test]
    fn report_serializes_sections_with_status_tag() {
        let (view, notice) = view_with_failed_sentiment();
        let report = build_report(&view, &[notice], TimeWindow::All, date!(2025 - 03 - 31), 5);

        let value = serde_json::to_value(&report).expect("report serializes");

        assert_eq!(value["chart"]["status"], "loaded");
        assert_eq!(value["chart"]["data"]["window"], "ALL");
        assert_eq!(value["chart"]["data"]["cutoff"], serde_json::Value::Null);
        assert_eq!(value["sentiment"]["status"], "failed");
        assert_eq!(value["prediction"]["data"]["trend"], "bullish");
        assert_eq!(value["as_of"], "2025-03-31");
    }

    #[test]
    fn tweet_limit_applies_to_serialized_report() {
        let (mut view, _) = view_with_failed_sentiment();
        view.sentiment = Ok(SentimentResult {
            ticker: ticker(),
            sentiment_score: 0.6,
            signal_label: String::from("Positive"),
            tweets: (1..=4)
                .map(|n| Tweet {
                    id: n.to_string(),
                    author: String::from("desk"),
                    text: format!("post {n}"),
                    created_at: String::from("2025-03-28T09:00:00+00:00"),
                    url: None,
                })
                .collect(),
            message: None,
        });

        let report = build_report(&view, &[], TimeWindow::All, date!(2025 - 03 - 31), 2);
        let value = serde_json::to_value(&report).expect("report serializes");

        let tweets = value["sentiment"]["data"]["tweets"]
            .as_array()
            .expect("tweets array");
        assert_eq!(tweets.len(), 2);
        assert_eq!(tweets[0]["id"], "1");
        assert_eq!(tweets[1]["id"], "2");
        assert_eq!(value["sentiment"]["data"]["total_tweets"], 4);
        assert_eq!(value["sentiment"]["data"]["gauge"], 1);
    }
}
