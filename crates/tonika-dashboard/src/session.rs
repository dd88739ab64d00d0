//! Per-session dashboard state.
//!
//! A session keeps the last single-text result, the last batch and the
//! active filters between actions. A failed action never modifies it.

use tracing::{info, warn};

use tonika_core::{AnalysisResult, BatchRow, Sentiment};

use crate::client::{ApiClient, BatchResponse};
use crate::error::{DashboardError, DashboardResult};
use crate::views::{filter_rows, BatchViews};

/// Table filters. `None` means inactive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    pub keyword: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl Filters {
    pub fn is_active(&self) -> bool {
        self.keyword.is_some() || self.sentiment.is_some()
    }
}

#[derive(Debug, Default)]
pub struct DashboardSession {
    last_result: Option<AnalysisResult>,
    batch: Option<Vec<BatchRow>>,
    filters: Filters,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Analyze one text. Blank input is rejected without calling the API.
    pub async fn analyze_text(
        &mut self,
        client: &ApiClient,
        text: &str,
    ) -> DashboardResult<AnalysisResult> {
        if text.trim().is_empty() {
            return Err(DashboardError::EmptyInput);
        }

        let result = client.analyze(text).await.map_err(|e| {
            warn!(error = %e, "Text analysis failed");
            e
        })?;
        self.last_result = Some(result);
        Ok(result)
    }

    /// Upload a spreadsheet and keep its rows as the current batch.
    ///
    /// Returns the number of scored rows.
    pub async fn analyze_file(
        &mut self,
        client: &ApiClient,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> DashboardResult<usize> {
        match client.analyze_file(file_name, bytes).await? {
            BatchResponse::Rows(rows) => {
                info!(rows = rows.len(), file_name, "Batch loaded");
                let count = rows.len();
                self.batch = Some(rows);
                Ok(count)
            }
            BatchResponse::Rejected { error } => {
                warn!(%error, file_name, "Spreadsheet rejected");
                Err(DashboardError::Rejected(error))
            }
        }
    }

    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.last_result.as_ref()
    }

    pub fn batch(&self) -> Option<&[BatchRow]> {
        self.batch.as_deref()
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Set the keyword filter; blank clears it.
    pub fn set_keyword(&mut self, keyword: &str) {
        let keyword = keyword.trim();
        self.filters.keyword = (!keyword.is_empty()).then(|| keyword.to_string());
    }

    pub fn set_sentiment_filter(&mut self, sentiment: Option<Sentiment>) {
        self.filters.sentiment = sentiment;
    }

    pub fn clear_filters(&mut self) {
        self.filters = Filters::default();
    }

    /// Sentiments present in the current batch, for the class selector.
    pub fn available_sentiments(&self) -> Vec<Sentiment> {
        let rows = self.batch().unwrap_or_default();
        Sentiment::ALL
            .into_iter()
            .filter(|s| rows.iter().any(|r| r.sentiment == *s))
            .collect()
    }

    /// Current batch rows after both filters.
    pub fn filtered_rows(&self) -> Vec<&BatchRow> {
        let Some(rows) = self.batch() else {
            return Vec::new();
        };
        filter_rows(rows, self.filters.keyword.as_deref(), self.filters.sentiment)
    }

    /// Chart data for the whole current batch.
    pub fn views(&self) -> Option<BatchViews> {
        self.batch().map(BatchViews::compute)
    }
}
