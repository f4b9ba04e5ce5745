use serde::{Deserialize, Serialize};

use super::{decode, FetchError, FetchFuture, Gateway, GatewayTransport};
use crate::http_client::HttpRequest;
use crate::source::SourceKind;
use crate::{Prediction, Ticker};

const PATH: &str = "next_day_pred";

/// Next-session close prediction from `POST /next_day_pred`.
#[derive(Clone)]
pub struct PredictionGateway {
    transport: GatewayTransport,
}

#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    ticker: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    previous_day_price: f64,
    predicted_price: f64,
    signal: serde_json::Number,
}

impl PredictionGateway {
    pub fn new(transport: GatewayTransport) -> Self {
        Self { transport }
    }

    async fn fetch_prediction(&self, ticker: &Ticker) -> Result<Prediction, FetchError> {
        let body = serde_json::to_string(&PredictionRequest {
            ticker: ticker.as_str(),
        })
        .map_err(|e| FetchError::malformed(SourceKind::Prediction, e.to_string()))?;

        let request = HttpRequest::post_json(self.transport.endpoint(PATH), body);
        let payload = self.transport.send(SourceKind::Prediction, request).await?;
        let response: PredictionResponse = decode(SourceKind::Prediction, &payload)?;

        Ok(Prediction {
            ticker: ticker.clone(),
            previous_close: response.previous_day_price,
            predicted_close: response.predicted_price,
            signal: integral_signal(&response.signal)?,
        })
    }
}

impl Gateway for PredictionGateway {
    type Output = Prediction;

    fn source_kind(&self) -> SourceKind {
        SourceKind::Prediction
    }

    fn fetch<'a>(&'a self, ticker: &'a Ticker) -> FetchFuture<'a, Self::Output> {
        Box::pin(self.fetch_prediction(ticker))
    }
}

/// Accept `1` as well as `1.0`; reject fractional signals.
fn integral_signal(raw: &serde_json::Number) -> Result<i64, FetchError> {
    if let Some(value) = raw.as_i64() {
        return Ok(value);
    }
    match raw.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() <= i64::MAX as f64 => Ok(value as i64),
        _ => Err(FetchError::malformed(
            SourceKind::Prediction,
            format!("signal must be an integer, got {raw}"),
        )),
    }
}
