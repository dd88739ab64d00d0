//! HTTP client for the Tonika API.

use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use tonika_core::{AnalysisRequest, AnalysisResult, BatchRow};

use crate::error::{DashboardError, DashboardResult};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Answer of the spreadsheet endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BatchResponse {
    Rows(Vec<BatchRow>),
    Rejected { error: String },
}

/// Blocking-per-action client; one request in flight per session.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /analyze/
    pub async fn analyze(&self, text: &str) -> DashboardResult<AnalysisResult> {
        let request = AnalysisRequest {
            text: text.to_string(),
        };
        let response = self
            .client
            .post(format!("{}/analyze/", self.base_url))
            .json(&request)
            .send()
            .await?;

        read_json(response).await
    }

    /// POST /analyze-file/ with the spreadsheet as the `file` field.
    pub async fn analyze_file(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> DashboardResult<BatchResponse> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(XLSX_MIME)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/analyze-file/", self.base_url))
            .multipart(form)
            .send()
            .await?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> DashboardResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!(%status, body = %body, "API request failed");
        return Err(DashboardError::Api {
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| DashboardError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tonika_core::Sentiment;
    use wiremock::matchers::{body_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_analyze() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze/"))
            .and(body_json(json!({"text": "I love this product"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"sentiment": "good", "confidence": 0.97})),
            )
            .mount(&server)
            .await;

        let result = ApiClient::new(&server.uri())
            .analyze("I love this product")
            .await
            .unwrap();
        assert_eq!(result.sentiment, Sentiment::Good);
        assert_eq!(result.confidence, 0.97);
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = ApiClient::new(&server.uri()).analyze("x").await.unwrap_err();
        assert!(matches!(err, DashboardError::Api { status: 500 }));
    }

    #[tokio::test]
    async fn test_unparsable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
            .mount(&server)
            .await;

        let err = ApiClient::new(&server.uri()).analyze("x").await.unwrap_err();
        assert!(matches!(err, DashboardError::Parse(_)));
    }

    #[tokio::test]
    async fn test_analyze_file_rows_and_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/analyze-file/"))
            .and(header_exists("content-type"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"UserSenderId": 1, "SubmitDate": "2024-01-01T10:00:00",
                 "MessageText": "great", "sentiment": "good", "confidence": 0.8}
            ])))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/analyze-file/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"error": "File must contain column 'MessageText'"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri());
        match client.analyze_file("reviews.xlsx", b"PK".to_vec()).await.unwrap() {
            BatchResponse::Rows(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].sentiment, Sentiment::Good);
            }
            other => panic!("expected rows, got {other:?}"),
        }
        assert_eq!(
            client.analyze_file("reviews.xlsx", b"PK".to_vec()).await.unwrap(),
            BatchResponse::Rejected {
                error: "File must contain column 'MessageText'".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_api() {
        let err = ApiClient::new("http://127.0.0.1:9").analyze("x").await.unwrap_err();
        assert!(matches!(err, DashboardError::Network(_)));
    }
}
