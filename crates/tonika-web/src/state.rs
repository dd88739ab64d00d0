//! Application state.

use tonika_core::SentimentAnalyzer;

/// Application state shared across handlers.
///
/// Holds the single analyzer (and through it the classifier) built at
/// startup.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: SentimentAnalyzer,
}

impl AppState {
    pub fn new(analyzer: SentimentAnalyzer) -> Self {
        Self { analyzer }
    }
}
