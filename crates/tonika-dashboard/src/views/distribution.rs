//! Sentiment distribution (pie chart data).

use serde::Serialize;
use tonika_core::{BatchRow, Sentiment};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentShare {
    pub sentiment: Sentiment,
    pub count: usize,
    /// Fraction of all rows, in [0, 1].
    pub share: f64,
}

/// Count and share of every sentiment present in `rows`, in display order.
pub fn distribution(rows: &[BatchRow]) -> Vec<SentimentShare> {
    let total = rows.len();
    Sentiment::ALL
        .iter()
        .filter_map(|&sentiment| {
            let count = rows.iter().filter(|r| r.sentiment == sentiment).count();
            (count > 0).then(|| SentimentShare {
                sentiment,
                count,
                share: count as f64 / total as f64,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(sentiment: Sentiment) -> BatchRow {
        BatchRow {
            user_sender_id: json!(1),
            submit_date: json!(null),
            message_text: json!("text"),
            sentiment,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_shares_sum_to_one() {
        let rows = vec![
            row(Sentiment::Good),
            row(Sentiment::Bad),
            row(Sentiment::Good),
            row(Sentiment::Good),
        ];
        let dist = distribution(&rows);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0].sentiment, Sentiment::Bad);
        assert_eq!(dist[0].count, 1);
        assert_eq!(dist[1].sentiment, Sentiment::Good);
        assert_eq!(dist[1].share, 0.75);
        let total: f64 = dist.iter().map(|d| d.share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch() {
        assert!(distribution(&[]).is_empty());
    }
}
