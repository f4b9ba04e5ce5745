use serde::Deserialize;

use super::{decode, FetchError, FetchFuture, Gateway, GatewayTransport};
use crate::http_client::HttpRequest;
use crate::source::SourceKind;
use crate::{SentimentResult, Ticker, Tweet};

/// Social sentiment and recent posts from `GET /sentiment-and-tweets/{ticker}/`.
#[derive(Clone)]
pub struct SentimentGateway {
    transport: GatewayTransport,
}

#[derive(Debug, Deserialize)]
struct SentimentResponse {
    #[serde(default)]
    sentiment_score: f64,
    signal: String,
    #[serde(default)]
    tweets: Vec<WireTweet>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireTweet {
    #[serde(rename = "Tweet ID")]
    id: serde_json::Value,
    #[serde(rename = "User", default)]
    user: Option<String>,
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "Created At", default)]
    created_at: String,
    #[serde(default)]
    tweet_url: Option<String>,
}

impl SentimentGateway {
    pub fn new(transport: GatewayTransport) -> Self {
        Self { transport }
    }

    async fn fetch_sentiment(&self, ticker: &Ticker) -> Result<SentimentResult, FetchError> {
        let path = format!("sentiment-and-tweets/{}/", urlencoding::encode(ticker.as_str()));
        let request = HttpRequest::get(self.transport.endpoint(&path));
        let payload = self.transport.send(SourceKind::Sentiment, request).await?;
        let response: SentimentResponse = decode(SourceKind::Sentiment, &payload)?;

        Ok(SentimentResult {
            ticker: ticker.clone(),
            sentiment_score: response.sentiment_score,
            signal_label: response.signal,
            tweets: response.tweets.into_iter().map(WireTweet::into_tweet).collect(),
            message: response.message,
        })
    }
}

impl Gateway for SentimentGateway {
    type Output = SentimentResult;

    fn source_kind(&self) -> SourceKind {
        SourceKind::Sentiment
    }

    fn fetch<'a>(&'a self, ticker: &'a Ticker) -> FetchFuture<'a, Self::Output> {
        Box::pin(self.fetch_sentiment(ticker))
    }
}

impl WireTweet {
    fn into_tweet(self) -> Tweet {
        let id = match self.id {
            serde_json::Value::String(id) => id,
            other => other.to_string(),
        };

        Tweet {
            id,
            author: self.user.unwrap_or_else(|| String::from("Unknown")),
            text: self.text,
            created_at: self.created_at,
            url: self.tweet_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShankhConfig;
    use crate::gateways::test_support::*;
    use crate::gateways::FetchErrorKind;
    use crate::http_client::{HttpMethod, HttpResponse};

    #[tokio::test]
    async fn encodes_ticker_into_path() {
        let body = r#"{"ticker":"M&M.NS","sentiment_score":0.0,"signal":"Neutral","tweets":[]}"#;
        let client = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(body))]);
        let gateway = SentimentGateway::new(transport_with(client.clone(), ShankhConfig::default()));

        gateway.fetch(&ticker("M&M.NS")).await.expect("decodes");

        let requests = client.requests();
        assert_eq!(requests[0].method, HttpMethod::Get);
        assert_eq!(
            requests[0].url,
            "http://localhost:8000/sentiment-and-tweets/M%26M.NS/"
        );
    }

    #[tokio::test]
    async fn decodes_tweets_with_numeric_ids_and_missing_authors() {
        let body = r##"{
            "ticker": "ITC.NS",
            "sentiment_score": 0.4,
            "signal": "Positive",
            "message": "Success",
            "tweets": [
                {"Tweet ID": 1893345123456789, "User": "Desk (@desk)", "Text": "#ITC strong quarter",
                 "Created At": "2025-02-21T10:15:00+00:00",
                 "tweet_url": "https://twitter.com/desk/status/1893345123456789"},
                {"Tweet ID": "42", "User": null, "Text": "flat", "Created At": "2025-02-21T11:00:00+00:00",
                 "tweet_url": null}
            ]
        }"##;
        let client = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(body))]);
        let gateway = SentimentGateway::new(transport_with(client, ShankhConfig::default()));

        let result = gateway.fetch(&ticker("ITC.NS")).await.expect("decodes");

        assert_eq!(result.signal_label, "Positive");
        assert_eq!(result.message.as_deref(), Some("Success"));
        assert_eq!(result.tweets.len(), 2);
        assert_eq!(result.tweets[0].id, "1893345123456789");
        assert_eq!(result.tweets[1].id, "42");
        assert_eq!(result.tweets[1].author, "Unknown");
        assert_eq!(result.tweets[1].url, None);
    }

    #[tokio::test]
    async fn missing_signal_is_malformed() {
        let body = r#"{"ticker":"ITC.NS","sentiment_score":0.1}"#;
        let client = RecordingHttpClient::replying(vec![Ok(HttpResponse::ok_json(body))]);
        let gateway = SentimentGateway::new(transport_with(client, ShankhConfig::default()));

        let error = gateway
            .fetch(&ticker("ITC.NS"))
            .await
            .expect_err("signal is required");

        assert_eq!(error.kind(), FetchErrorKind::Malformed);
    }
}
