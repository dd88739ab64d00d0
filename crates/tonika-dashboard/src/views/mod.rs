//! Data behind the dashboard's table and charts.
//!
//! Pure functions over batch rows; rendering is left to the front end.

pub mod distribution;
pub mod filter;
pub mod timeline;
pub mod words;

use serde::Serialize;
use tonika_core::BatchRow;

pub use distribution::{distribution, SentimentShare};
pub use filter::filter_rows;
pub use timeline::{monthly_counts, parse_submit_date, MonthlyCount};
pub use words::{top_words, ClassWords, WordCount, TOP_WORDS};

/// All chart data for one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchViews {
    pub distribution: Vec<SentimentShare>,
    pub monthly: Vec<MonthlyCount>,
    pub top_words: Vec<ClassWords>,
}

impl BatchViews {
    pub fn compute(rows: &[BatchRow]) -> Self {
        Self {
            distribution: distribution(rows),
            monthly: monthly_counts(rows),
            top_words: top_words(rows, TOP_WORDS),
        }
    }
}
