//! Client for the Cloud Natural Language sentiment endpoint
//!
//! Wraps `POST v1/documents:analyzeSentiment` and classifies the service's
//! responses into the three categories the collector cares about:
//! rate-limited (retry), rejected content (skip), anything else (fatal).

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Sentiment scored for one piece of text. `raw` is the full response
/// document as the service returned it; `score`/`magnitude` are the
/// document-level values extracted from it.
#[derive(Debug, Clone)]
pub struct SentimentScore {
    pub score: f64,
    pub magnitude: f64,
    pub raw: serde_json::Value,
}

/// The scoring-service seam. The collector is written against this trait
/// so a caller constructs the client once and passes it in; tests stand in
/// a mock server behind the same interface.
#[async_trait]
pub trait AnalyzeSentiment {
    /// Score a single piece of text.
    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentScore>;
}

#[derive(Debug, Clone, Serialize)]
struct AnalyzeSentimentRequest<'a> {
    document: Document<'a>,
}

#[derive(Debug, Clone, Serialize)]
struct Document<'a> {
    #[serde(rename = "type")]
    doc_type: &'static str,
    content: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct AnalyzeSentimentResponse {
    #[serde(rename = "documentSentiment")]
    document_sentiment: DocumentSentiment,
}

#[derive(Debug, Clone, Deserialize)]
struct DocumentSentiment {
    #[serde(default)]
    score: f64,
    #[serde(default)]
    magnitude: f64,
}

/// Error envelope the service wraps non-success responses in
#[derive(Debug, Clone, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: u16,
    #[serde(default)]
    message: String,
}

/// HTTP client for the Natural Language API
pub struct LanguageClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl LanguageClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    fn endpoint(&self) -> Result<Url> {
        self.base_url
            .join("v1/documents:analyzeSentiment")
            .map_err(|e| Error::Config(format!("Invalid API endpoint URL: {}", e)))
    }

    /// Turn a non-success response into the matching error category.
    /// 429 is transient, 400 is a per-document rejection, everything
    /// else is fatal for the run.
    fn classify_failure(status: u16, body: &str) -> Error {
        match status {
            429 => Error::RateLimited,
            400 => match serde_json::from_str::<ErrorEnvelope>(body) {
                Ok(envelope) => Error::RejectedContent {
                    code: envelope.error.code,
                    message: envelope.error.message,
                },
                Err(_) => Error::RejectedContent {
                    code: 400,
                    message: body.trim().to_string(),
                },
            },
            _ => Error::ServiceStatus {
                status,
                message: serde_json::from_str::<ErrorEnvelope>(body)
                    .map(|envelope| envelope.error.message)
                    .unwrap_or_else(|_| body.trim().to_string()),
            },
        }
    }
}

#[async_trait]
impl AnalyzeSentiment for LanguageClient {
    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentScore> {
        let url = self.endpoint()?;
        let request = AnalyzeSentimentRequest {
            document: Document {
                doc_type: "PLAIN_TEXT",
                content: text,
            },
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::classify_failure(status.as_u16(), &body));
        }

        let raw: serde_json::Value = serde_json::from_str(&body)?;
        let parsed: AnalyzeSentimentResponse = serde_json::from_value(raw.clone())?;

        Ok(SentimentScore {
            score: parsed.document_sentiment.score,
            magnitude: parsed.document_sentiment.magnitude,
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LanguageClient {
        LanguageClient::new(&server.uri(), "test-key", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_analyze_sentiment_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/documents:analyzeSentiment"))
            .and(query_param("key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "document": { "type": "PLAIN_TEXT", "content": "good news everyone" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "documentSentiment": { "score": 0.6, "magnitude": 1.2 },
                "language": "en"
            })))
            .mount(&server)
            .await;

        let scored = client_for(&server)
            .analyze_sentiment("good news everyone")
            .await
            .unwrap();

        assert_eq!(scored.score, 0.6);
        assert_eq!(scored.magnitude, 1.2);
        // The raw document keeps fields we do not model
        assert_eq!(scored.raw["language"], "en");
    }

    #[tokio::test]
    async fn test_429_maps_to_rate_limited() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/documents:analyzeSentiment"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .analyze_sentiment("anything")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::RateLimited));
    }

    #[tokio::test]
    async fn test_400_maps_to_rejected_content_with_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/documents:analyzeSentiment"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": {
                    "code": 400,
                    "message": "The language und is not supported for document_sentiment analysis.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).analyze_sentiment("").await.unwrap_err();
        match err {
            Error::RejectedContent { code, message } => {
                assert_eq!(code, 400);
                assert!(message.contains("not supported"));
            }
            other => panic!("expected RejectedContent, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_other_status_is_fatal() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/documents:analyzeSentiment"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .analyze_sentiment("anything")
            .await
            .unwrap_err();
        assert!(err.is_fatal_for_collection());
        match err {
            Error::ServiceStatus { status, .. } => assert_eq!(status, 503),
            other => panic!("expected ServiceStatus, got {:?}", other),
        }
    }
}
