//! Offline fixtures shared by the behavior tests.
//!
//! [`ScriptedHttpClient`] answers gateway requests from canned routes keyed by
//! endpoint and ticker, and can hold every request for a ticker until a gate
//! opens, which lets tests control the order in which selections settle.

#![allow(dead_code)]

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use serde_json::json;
use shankh_core::{
    iso_date, HttpClient, HttpError, HttpRequest, HttpResponse, Orchestrator, OrchestratorBuilder,
};
use time::{Date, Duration};
use tokio::sync::watch;

pub const PRICE: &str = "/fetch-data";
pub const PREDICTION: &str = "/next_day_pred";
pub const SENTIMENT: &str = "/sentiment-and-tweets/";
pub const FINANCIALS: &str = "/get-financial-data/";

struct Route {
    endpoint: String,
    ticker: String,
    outcome: Result<HttpResponse, HttpError>,
}

struct Gate {
    ticker: String,
    open: watch::Receiver<bool>,
}

#[derive(Default)]
pub struct ScriptedHttpClient {
    routes: Mutex<Vec<Route>>,
    gates: Mutex<Vec<Gate>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// All four services answer successfully for `ticker`.
    pub fn healthy(self, ticker: &str) -> Self {
        self.on(PRICE, ticker, Ok(HttpResponse::ok_json(price_body(ticker, &sample_dates()))))
            .on(PREDICTION, ticker, Ok(HttpResponse::ok_json(prediction_body(ticker, 1))))
            .on(SENTIMENT, ticker, Ok(HttpResponse::ok_json(sentiment_body(ticker, "Positive"))))
            .on(FINANCIALS, ticker, Ok(HttpResponse::ok_json(financials_body(ticker))))
    }

    /// Answer requests to `endpoint` that mention `ticker`. Earlier routes win.
    pub fn on(
        self,
        endpoint: &str,
        ticker: &str,
        outcome: Result<HttpResponse, HttpError>,
    ) -> Self {
        self.routes
            .lock()
            .expect("routes lock")
            .push(Route {
                endpoint: endpoint.to_owned(),
                ticker: ticker.to_owned(),
                outcome,
            });
        self
    }

    /// Hold every request mentioning `ticker` until `open` reads `true`.
    pub fn gated(self, ticker: &str, open: watch::Receiver<bool>) -> Self {
        self.gates.lock().expect("gates lock").push(Gate {
            ticker: ticker.to_owned(),
            open,
        });
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn request_count(&self, endpoint: &str, ticker: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.url.contains(endpoint) && mentions(request, ticker))
            .count()
    }
}

fn mentions(request: &HttpRequest, ticker: &str) -> bool {
    request.url.contains(ticker)
        || request
            .body
            .as_deref()
            .is_some_and(|body| body.contains(&format!("\"{ticker}\"")))
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        let outcome = self
            .routes
            .lock()
            .expect("routes lock")
            .iter()
            .find(|route| request.url.contains(&route.endpoint) && mentions(&request, &route.ticker))
            .map(|route| route.outcome.clone())
            .unwrap_or_else(|| Ok(HttpResponse::new(404, r#"{"detail":"Not Found"}"#)));

        let gate = self
            .gates
            .lock()
            .expect("gates lock")
            .iter()
            .find(|gate| mentions(&request, &gate.ticker))
            .map(|gate| gate.open.clone());

        self.requests.lock().expect("requests lock").push(request);

        Box::pin(async move {
            if let Some(mut open) = gate {
                loop {
                    let is_open = *open.borrow_and_update();
                    if is_open || open.changed().await.is_err() {
                        break;
                    }
                }
            }
            outcome
        })
    }
}

pub fn orchestrator(client: Arc<ScriptedHttpClient>) -> Orchestrator {
    OrchestratorBuilder::new()
        .with_base_url("http://dashboard.test")
        .with_http_client(client)
        .build()
        .expect("valid test configuration")
}

// =============================================================================
// JSON fixtures in the services' wire shapes
// =============================================================================

pub fn sample_dates() -> Vec<Date> {
    ["2025-02-27", "2025-02-28", "2025-03-03", "2025-03-04", "2025-03-05"]
        .iter()
        .map(|raw| iso_date::parse(raw).expect("fixture date"))
        .collect()
}

/// `days` consecutive calendar days ending on `last`.
pub fn daily_dates(last: Date, days: i64) -> Vec<Date> {
    (0..days)
        .rev()
        .map(|offset| last - Duration::days(offset))
        .collect()
}

pub fn price_body(ticker: &str, dates: &[Date]) -> String {
    let data: Vec<serde_json::Value> = dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let open = 1_200.0 + index as f64;
            let close = if index % 3 == 0 { open - 4.5 } else { open + 6.25 };
            json!({
                "Date": format!("{}T00:00:00+05:30", iso_date::format(*date)),
                "Open": open,
                "High": open.max(close) + 3.0,
                "Low": open.min(close) - 3.0,
                "Close": close,
                "Volume": 4_500_000 + index as u64,
                "Dividends": 0.0,
                "Stock Splits": 0.0
            })
        })
        .collect();

    json!({ "status": "success", "ticker": ticker, "data": data }).to_string()
}

pub fn prediction_body(ticker: &str, signal: i64) -> String {
    json!({
        "ticker": ticker,
        "previous_day_price": 1_250.0,
        "predicted_price": 1_290.5,
        "signal": signal
    })
    .to_string()
}

pub fn sentiment_body(ticker: &str, label: &str) -> String {
    json!({
        "ticker": ticker,
        "sentiment_score": 0.3,
        "signal": label,
        "tweets": [{
            "Tweet ID": 1_890_000_000_000_000_001_u64,
            "User": "Market Desk (@mdesk)",
            "Text": format!("#{ticker} looking strong"),
            "Created At": "2025-03-05T09:30:00+00:00",
            "tweet_url": "https://twitter.com/mdesk/status/1890000000000000001"
        }],
        "message": "Success"
    })
    .to_string()
}

pub fn financials_body(ticker: &str) -> String {
    json!({
        "ticker": ticker,
        "financial_data": {
            "date": "2024-03-31",
            "total_revenue": 9_010_640_000_000.0_f64,
            "net_income": 696_210_000_000.0_f64,
            "ebitda": 1_786_770_000_000.0_f64,
            "diluted_eps": 51.45,
            "basic_eps": 51.45
        }
    })
    .to_string()
}

pub fn server_error(detail: &str) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::new(500, json!({ "detail": detail }).to_string()))
}

pub fn unreachable() -> Result<HttpResponse, HttpError> {
    Err(HttpError::new("connection refused"))
}
