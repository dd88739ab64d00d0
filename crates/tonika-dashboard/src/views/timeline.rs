//! Per-month sentiment counts (bar chart plus total trend line).

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;
use tonika_core::{BatchRow, Sentiment};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%Y/%m/%d"];

/// Counts for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`.
    pub month: String,
    pub counts: BTreeMap<Sentiment, usize>,
    pub total: usize,
}

impl MonthlyCount {
    pub fn count(&self, sentiment: Sentiment) -> usize {
        self.counts.get(&sentiment).copied().unwrap_or(0)
    }
}

/// Parse a `SubmitDate` cell. Non-text and unrecognised values yield `None`.
pub fn parse_submit_date(value: &Value) -> Option<NaiveDate> {
    let text = value.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

/// Month buckets in chronological order. Rows with unparsable dates are dropped.
pub fn monthly_counts(rows: &[BatchRow]) -> Vec<MonthlyCount> {
    let mut months: BTreeMap<String, BTreeMap<Sentiment, usize>> = BTreeMap::new();

    for row in rows {
        let Some(date) = parse_submit_date(&row.submit_date) else {
            continue;
        };
        *months
            .entry(date.format("%Y-%m").to_string())
            .or_default()
            .entry(row.sentiment)
            .or_default() += 1;
    }

    months
        .into_iter()
        .map(|(month, counts)| MonthlyCount {
            total: counts.values().sum(),
            month,
            counts,
        })
        .collect()
}
