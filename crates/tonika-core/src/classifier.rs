//! The seam between the service and the text-classification model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// Raw model output for one text: the predicted class and its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// A pretrained sentiment classifier.
///
/// One instance is constructed at startup and shared read-only by every
/// request handler.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify a single non-empty text.
    async fn classify(&self, text: &str) -> CoreResult<Prediction>;

    /// Identifier of the model behind this classifier.
    fn model_id(&self) -> &str;
}
