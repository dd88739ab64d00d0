//! Request and result types for single-text and batch analysis.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sentiment::Sentiment;

/// Column holding the text to classify.
pub const MESSAGE_TEXT: &str = "MessageText";
/// Sender column, passed through unchanged.
pub const USER_SENDER_ID: &str = "UserSenderId";
/// Submission date column, passed through unchanged.
pub const SUBMIT_DATE: &str = "SubmitDate";

/// Columns a batch spreadsheet must contain, in validation order.
pub const REQUIRED_COLUMNS: [&str; 3] = [MESSAGE_TEXT, USER_SENDER_ID, SUBMIT_DATE];

/// Body of a single-text analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

/// Sentiment of one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub sentiment: Sentiment,
    pub confidence: f64,
}

impl AnalysisResult {
    /// Result used when there is nothing to classify.
    pub fn unknown() -> Self {
        Self {
            sentiment: Sentiment::Unknown,
            confidence: 0.0,
        }
    }
}

/// One scored spreadsheet row, projected to the fixed output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    #[serde(rename = "UserSenderId", default)]
    pub user_sender_id: Value,
    #[serde(rename = "SubmitDate", default)]
    pub submit_date: Value,
    #[serde(rename = "MessageText", default)]
    pub message_text: Value,
    pub sentiment: Sentiment,
    pub confidence: f64,
}

impl BatchRow {
    /// The original message when it is text.
    pub fn message(&self) -> Option<&str> {
        self.message_text.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_row_wire_names() {
        let row = BatchRow {
            user_sender_id: json!(17),
            submit_date: json!("2024-03-01T09:30:00"),
            message_text: json!("<b>great</b>"),
            sentiment: Sentiment::Good,
            confidence: 0.93,
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            json!({
                "UserSenderId": 17,
                "SubmitDate": "2024-03-01T09:30:00",
                "MessageText": "<b>great</b>",
                "sentiment": "good",
                "confidence": 0.93
            })
        );
    }

    #[test]
    fn test_batch_row_tolerates_missing_passthrough_fields() {
        let row: BatchRow =
            serde_json::from_value(json!({"sentiment": "bad", "confidence": 0.5})).unwrap();
        assert!(row.user_sender_id.is_null());
        assert_eq!(row.message(), None);
        assert_eq!(row.sentiment, Sentiment::Bad);
    }
}
