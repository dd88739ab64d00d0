//! Tonika Core Library
//!
//! Domain types and business logic for the Tonika sentiment service:
//! label mapping, text sanitization, spreadsheet reading and the
//! batch scoring pipeline.

pub mod analysis;
pub mod classifier;
pub mod config;
pub mod error;
pub mod sanitize;
pub mod sentiment;
pub mod sheet;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use analysis::model::{AnalysisRequest, AnalysisResult, BatchRow};
pub use analysis::{SanitizePolicy, SentimentAnalyzer};
pub use classifier::{Prediction, SentimentClassifier};
pub use config::Settings;
pub use error::{CoreError, CoreResult};
pub use sentiment::Sentiment;
pub use sheet::{CellValue, Sheet};
