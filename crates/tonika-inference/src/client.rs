//! Classifier HTTP client.
//!
//! Uses `POST /predict` to score a text and `GET /info` to confirm which
//! model the server has loaded. The server loads the model once; this
//! client is created once at startup and shared by every request.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tonika_core::config::ModelSettings;
use tonika_core::{CoreError, CoreResult, Prediction, SentimentClassifier};

/// Text-classification client.
#[derive(Clone)]
pub struct ClassifierClient {
    base_url: String,
    model_id: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    inputs: &'a str,
    truncate: bool,
}

/// `/predict` answers with all class scores, nested when the server
/// treats the input as a batch.
#[derive(Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Single(Vec<Prediction>),
    Batch(Vec<Vec<Prediction>>),
}

impl PredictResponse {
    fn into_scores(self) -> Vec<Prediction> {
        match self {
            Self::Single(scores) => scores,
            Self::Batch(batches) => batches.into_iter().next().unwrap_or_default(),
        }
    }
}

/// Subset of the server's `/info` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelInfo {
    pub model_id: String,
    #[serde(default)]
    pub version: Option<String>,
}

impl ClassifierClient {
    /// Create a new client for the given server URL and model.
    pub fn new(base_url: &str, model_id: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model_id: model_id.to_string(),
            client,
        }
    }

    pub fn from_settings(settings: &ModelSettings) -> Self {
        Self::new(
            &settings.url,
            &settings.model_id,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Score a text and return the most probable class.
    pub async fn predict(&self, text: &str) -> Result<Prediction> {
        let request = PredictRequest {
            inputs: text,
            truncate: true,
        };

        let response = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to connect to the model server")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Model server error ({}): {}", status, body);
        }

        let scores = response
            .json::<PredictResponse>()
            .await
            .context("Failed to parse model server response")?
            .into_scores();

        let best = scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .context("Model server returned no scores")?;

        debug!(label = %best.label, score = best.score, "Predicted");

        Ok(best)
    }

    /// Fetch the model information reported by the server.
    pub async fn info(&self) -> Result<ModelInfo> {
        let response = self
            .client
            .get(format!("{}/info", self.base_url))
            .send()
            .await
            .context("Failed to connect to the model server")?;

        if !response.status().is_success() {
            anyhow::bail!("Model server error ({})", response.status());
        }

        response
            .json()
            .await
            .context("Failed to parse model info")
    }

    /// Check that the server is up and serving the configured model.
    pub async fn health_check(&self) -> Result<bool> {
        match self.info().await {
            Ok(info) => Ok(info.model_id == self.model_id),
            Err(e) => {
                debug!(error = %e, "Model server health check failed");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl SentimentClassifier for ClassifierClient {
    async fn classify(&self, text: &str) -> CoreResult<Prediction> {
        self.predict(text)
            .await
            .map_err(|e| CoreError::inference(format!("{e:#}")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
