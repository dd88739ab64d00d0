//! Keyword and sentiment filters over batch rows.

use tonika_core::{BatchRow, Sentiment};

/// Rows matching both the keyword and the sentiment filter.
///
/// The keyword is a case-insensitive substring of `MessageText`; rows
/// without textual message never match it. A blank keyword or `None`
/// disables that filter.
pub fn filter_rows<'a>(
    rows: &'a [BatchRow],
    keyword: Option<&str>,
    sentiment: Option<Sentiment>,
) -> Vec<&'a BatchRow> {
    let needle = keyword
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_lowercase);

    rows.iter()
        .filter(|row| sentiment.map_or(true, |s| row.sentiment == s))
        .filter(|row| match &needle {
            Some(needle) => row
                .message()
                .map_or(false, |m| m.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn row(message: Value, sentiment: Sentiment) -> BatchRow {
        BatchRow {
            user_sender_id: json!(1),
            submit_date: json!("2024-01-01"),
            message_text: message,
            sentiment,
            confidence: 0.5,
        }
    }

    fn rows() -> Vec<BatchRow> {
        vec![
            row(json!("Great delivery"), Sentiment::Good),
            row(json!("late DELIVERY, awful"), Sentiment::Bad),
            row(json!("great price"), Sentiment::Good),
            row(json!(12345), Sentiment::Good),
            row(Value::Null, Sentiment::Neutral),
        ]
    }

    #[test]
    fn test_no_filters_returns_everything() {
        let rows = rows();
        assert_eq!(filter_rows(&rows, None, None).len(), 5);
        assert_eq!(filter_rows(&rows, Some("   "), None).len(), 5);
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let rows = rows();
        let hits = filter_rows(&rows, Some("Delivery"), None);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].message(), Some("Great delivery"));
        assert_eq!(hits[1].message(), Some("late DELIVERY, awful"));
    }

    #[test]
    fn test_non_text_messages_never_match_keyword() {
        let rows = rows();
        assert!(filter_rows(&rows, Some("123"), None).is_empty());
    }

    #[test]
    fn test_filters_compose_with_and() {
        let rows = rows();
        let hits = filter_rows(&rows, Some("great"), Some(Sentiment::Good));
        assert_eq!(hits.len(), 2);

        let expected: Vec<&BatchRow> = rows
            .iter()
            .filter(|r| r.sentiment == Sentiment::Good)
            .filter(|r| r.message().map_or(false, |m| m.to_lowercase().contains("great")))
            .collect();
        assert_eq!(hits, expected);

        assert!(filter_rows(&rows, Some("great"), Some(Sentiment::Bad)).is_empty());
        assert_eq!(filter_rows(&rows, None, Some(Sentiment::Neutral)).len(), 1);
    }
}
