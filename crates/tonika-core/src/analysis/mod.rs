//! Single-text and batch sentiment analysis.
//!
//! Both paths share one classifier and, by default, the same
//! pre-inference sanitization step.

pub mod model;

use std::sync::Arc;

use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::classifier::SentimentClassifier;
use crate::error::{CoreError, CoreResult};
use crate::sanitize::sanitize_text;
use crate::sentiment::Sentiment;
use crate::sheet::Sheet;
use model::{AnalysisResult, BatchRow, MESSAGE_TEXT, REQUIRED_COLUMNS, SUBMIT_DATE, USER_SENDER_ID};

/// Which analysis paths strip markup and truncate before inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizePolicy {
    pub single_text: bool,
    pub batch: bool,
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self {
            single_text: true,
            batch: true,
        }
    }
}

/// Positions of the required columns in a validated sheet.
struct BatchColumns {
    message_text: usize,
    user_sender_id: usize,
    submit_date: usize,
}

impl BatchColumns {
    fn locate(sheet: &Sheet) -> CoreResult<Self> {
        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|c| !sheet.has_column(c)) {
            return Err(CoreError::MissingColumn(missing.to_string()));
        }
        let index = |name: &str| sheet.column_index(name).unwrap_or_default();
        Ok(Self {
            message_text: index(MESSAGE_TEXT),
            user_sender_id: index(USER_SENDER_ID),
            submit_date: index(SUBMIT_DATE),
        })
    }
}

/// Runs texts through the shared classifier and maps the raw labels.
#[derive(Clone)]
pub struct SentimentAnalyzer {
    classifier: Arc<dyn SentimentClassifier>,
    policy: SanitizePolicy,
}

impl SentimentAnalyzer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>, policy: SanitizePolicy) -> Self {
        Self { classifier, policy }
    }

    pub fn model_id(&self) -> &str {
        self.classifier.model_id()
    }

    /// Analyze one text.
    pub async fn analyze_text(&self, text: &str) -> CoreResult<AnalysisResult> {
        let prepared = if self.policy.single_text {
            sanitize_text(Some(text))
        } else {
            text.to_string()
        };
        self.classify(&prepared).await
    }

    /// Score every row of a sheet, in order.
    ///
    /// Column validation happens before any inference call. The first
    /// classifier failure aborts the whole batch.
    pub async fn analyze_sheet(&self, sheet: &Sheet) -> CoreResult<Vec<BatchRow>> {
        let columns = BatchColumns::locate(sheet)?;
        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", %batch_id, rows = sheet.len());

        async move {
            let texts: Vec<String> = (0..sheet.len())
                .map(|row| {
                    let raw = sheet.cell(row, columns.message_text).as_text();
                    if self.policy.batch {
                        sanitize_text(raw.as_deref())
                    } else {
                        raw.unwrap_or_default()
                    }
                })
                .collect();

            let mut results = Vec::with_capacity(texts.len());
            for (row, text) in texts.iter().enumerate() {
                let result = self.classify(text).await.map_err(|e| {
                    debug!(row, error = %e, "Batch aborted");
                    e
                })?;
                results.push(result);
            }

            let rows: Vec<BatchRow> = results
                .into_iter()
                .enumerate()
                .map(|(row, result)| BatchRow {
                    user_sender_id: sheet.cell(row, columns.user_sender_id).to_json(),
                    submit_date: sheet.cell(row, columns.submit_date).to_json(),
                    message_text: sheet.cell(row, columns.message_text).to_json(),
                    sentiment: result.sentiment,
                    confidence: result.confidence,
                })
                .collect();

            info!(scored = rows.len(), "Batch analyzed");
            Ok(rows)
        }
        .instrument(span)
        .await
    }

    /// Classify prepared text. Blank text never reaches the model.
    async fn classify(&self, text: &str) -> CoreResult<AnalysisResult> {
        if text.trim().is_empty() {
            debug!("Empty text, skipping inference");
            return Ok(AnalysisResult::unknown());
        }

        let prediction = self.classifier.classify(text).await?;
        Ok(AnalysisResult {
            sentiment: Sentiment::from_raw_label(&prediction.label),
            confidence: prediction.score,
        })
    }
}
