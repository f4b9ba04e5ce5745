use serde::{Deserialize, Serialize};

use super::{decode, FetchError, FetchFuture, Gateway, GatewayTransport};
use crate::http_client::HttpRequest;
use crate::source::SourceKind;
use crate::{iso_date, PricePoint, PriceSeries, Ticker};

const PATH: &str = "fetch-data";

/// Daily OHLCV history from `POST /fetch-data`.
#[derive(Clone)]
pub struct PriceHistoryGateway {
    transport: GatewayTransport,
}

#[derive(Debug, Serialize)]
struct FetchDataRequest<'a> {
    ticker: &'a str,
    period: &'static str,
    interval: &'static str,
}

#[derive(Debug, Deserialize)]
struct FetchDataResponse {
    #[serde(default)]
    status: String,
    data: Vec<WirePoint>,
}

#[derive(Debug, Deserialize)]
struct WirePoint {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume", default)]
    volume: f64,
    #[serde(rename = "Dividends", default)]
    dividends: f64,
    #[serde(rename = "Stock Splits", default)]
    stock_splits: f64,
}

impl PriceHistoryGateway {
    pub fn new(transport: GatewayTransport) -> Self {
        Self { transport }
    }

    async fn fetch_series(&self, ticker: &Ticker) -> Result<PriceSeries, FetchError> {
        let config = self.transport.config();
        let body = serde_json::to_string(&FetchDataRequest {
            ticker: ticker.as_str(),
            period: config.history_period.as_str(),
            interval: config.history_interval.as_str(),
        })
        .map_err(|e| FetchError::malformed(SourceKind::PriceHistory, e.to_string()))?;

        let request = HttpRequest::post_json(self.transport.endpoint(PATH), body);
        let payload = self.transport.send(SourceKind::PriceHistory, request).await?;
        let response: FetchDataResponse = decode(SourceKind::PriceHistory, &payload)?;

        let points = response
            .data
            .into_iter()
            .map(WirePoint::into_point)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PriceSeries::new(ticker.clone(), response.status, points))
    }
}

impl Gateway for PriceHistoryGateway {
    type Output = PriceSeries;

    fn source_kind(&self) -> SourceKind {
        SourceKind::PriceHistory
    }

    fn fetch<'a>(&'a self, ticker: &'a Ticker) -> FetchFuture<'a, Self::Output> {
        Box::pin(self.fetch_series(ticker))
    }
}

impl WirePoint {
    fn into_point(self) -> Result<PricePoint, FetchError> {
        let date = iso_date::parse(&self.date)
            .map_err(|e| FetchError::malformed(SourceKind::PriceHistory, e.to_string()))?;

        Ok(PricePoint {
            date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: whole_volume(self.volume),
            dividends: self.dividends,
            stock_splits: self.stock_splits,
        })
    }
}

// Volumes arrive as JSON numbers that may carry a fractional part.
fn whole_volume(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 {
        raw.round() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShankhConfig;
    use crate::gateways::test_support::*;
    use crate::gateways::FetchErrorKind;
    use crate::http_client::{HttpMethod, HttpResponse};
    use crate::HistoryPeriod;
    use time::macros::date;

    const BODY: &str = r#"{
        "status": "success",
        "ticker": "RELIANCE.NS",
        "data": [
            {"Date": "2025-03-04T00:00:00+05:30", "Open": 1160.0, "High": 1172.5, "Low": 1150.2,
             "Close": 1168.4, "Volume": 10234567.0, "Dividends": 0.0, "Stock Splits": 0.0},
            {"Date": "2025-03-05", "Open": 1168.4, "High": 1180.0, "Low": 1161.0,
             "Close": 1175.9, "Volume": 8450000}
        ]
    }"#;

    #[tokio::test]
    async fn posts_ticker_with_configured_period_and_interval() {
        let client = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(BODY))]);
        let config = ShankhConfig {
            history_period: HistoryPeriod::TwoYears,
            ..ShankhConfig::default()
        };
        let gateway = PriceHistoryGateway::new(transport_with(client.clone(), config));

        gateway
            .fetch(&ticker("RELIANCE.NS"))
            .await
            .expect("series decodes");

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].url, "http://localhost:8000/fetch-data");
        let sent: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().expect("json body"))
                .expect("body is json");
        assert_eq!(
            sent,
            serde_json::json!({"ticker": "RELIANCE.NS", "period": "2y", "interval": "1d"})
        );
    }

    #[tokio::test]
    async fn keeps_calendar_date_and_source_order() {
        let client = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(BODY))]);
        let gateway =
            PriceHistoryGateway::new(transport_with(client, ShankhConfig::default()));

        let series = gateway
            .fetch(&ticker("RELIANCE.NS"))
            .await
            .expect("series decodes");

        assert_eq!(series.status, "success");
        assert_eq!(series.ticker.as_str(), "RELIANCE.NS");
        assert_eq!(series.len(), 2);
        assert_eq!(series.points[0].date, date!(2025 - 03 - 04));
        assert_eq!(series.points[0].volume, 10_234_567);
        assert_eq!(series.points[1].date, date!(2025 - 03 - 05));
        assert_eq!(series.points[1].dividends, 0.0);
    }

    #[tokio::test]
    async fn unparseable_date_is_malformed() {
        let body = r#"{"status":"success","data":[{"Date":"yesterday","Open":1,"High":1,"Low":1,"Close":1}]}"#;
        let client = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(body))]);
        let gateway =
            PriceHistoryGateway::new(transport_with(client, ShankhConfig::default()));

        let error = gateway
            .fetch(&ticker("INFY.NS"))
            .await
            .expect_err("bad date must fail");

        assert_eq!(error.kind(), FetchErrorKind::Malformed);
        assert_eq!(error.source_kind(), SourceKind::PriceHistory);
    }

    #[test]
    fn negative_or_nan_volume_becomes_zero() {
        assert_eq!(whole_volume(-5.0), 0);
        assert_eq!(whole_volume(f64::NAN), 0);
        assert_eq!(whole_volume(12.6), 13);
    }
}
