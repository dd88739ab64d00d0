//! Row-oriented view of an uploaded spreadsheet.
//!
//! Only the first worksheet is read. Its first row holds the column
//! names; rows where every cell is empty are skipped.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Text form of the cell, `None` when empty.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            Self::Float(f) => Some(match integral(*f) {
                Some(i) => i.to_string(),
                None => f.to_string(),
            }),
            Self::Bool(b) => Some(b.to_string()),
            Self::DateTime(dt) => Some(dt.format(ISO_FORMAT).to_string()),
        }
    }

    /// JSON form used in API responses.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Int(i) => Value::from(*i),
            Self::Float(f) => match integral(*f) {
                Some(i) => Value::from(i),
                None => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            },
            Self::Bool(b) => Value::Bool(*b),
            Self::DateTime(dt) => Value::String(dt.format(ISO_FORMAT).to_string()),
        }
    }

    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Self::Empty,
            Data::String(s) => Self::Text(s.clone()),
            Data::Int(i) => Self::Int(*i),
            Data::Float(f) => Self::Float(*f),
            Data::Bool(b) => Self::Bool(*b),
            Data::DateTime(dt) => match dt.as_datetime() {
                Some(parsed) => Self::DateTime(parsed),
                None => Self::Float(dt.as_f64()),
            },
            Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, ISO_FORMAT)
                .map(Self::DateTime)
                .unwrap_or_else(|_| Self::Text(s.clone())),
            Data::DurationIso(s) => Self::Text(s.clone()),
        }
    }
}

/// Whole floats (as Excel stores integers) are reported as integers.
fn integral(f: f64) -> Option<i64> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    (f.is_finite() && f.fract() == 0.0 && f.abs() <= MAX_EXACT).then(|| f as i64)
}

/// Headers plus data rows of one worksheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Build a sheet, padding short rows with empty cells.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() < width {
                    row.resize(width, CellValue::Empty);
                }
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Parse an uploaded workbook (xlsx, xlsm, xlsb, xls or ods).
    pub fn from_bytes(bytes: &[u8]) -> CoreResult<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| CoreError::spreadsheet(format!("Unable to open the workbook: {e}")))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| CoreError::spreadsheet("The workbook does not contain any worksheets"))?;

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            CoreError::spreadsheet(format!("Unable to read worksheet '{sheet_name}': {e}"))
        })?;

        Self::from_range(&range)
    }

    fn from_range(range: &Range<Data>) -> CoreResult<Self> {
        let mut rows_iter = range.rows();
        let header_row = rows_iter
            .next()
            .ok_or_else(|| CoreError::spreadsheet("The worksheet is empty"))?;

        let headers = header_row
            .iter()
            .map(|cell| CellValue::from_data(cell).as_text().unwrap_or_default())
            .collect();

        let rows = rows_iter
            .map(|row| row.iter().map(CellValue::from_data).collect::<Vec<_>>())
            .filter(|row| !row.iter().all(CellValue::is_empty))
            .collect();

        Ok(Self::new(headers, rows))
    }

    /// Index of the named column, matched exactly.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at `row`/`col`, `Empty` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(EMPTY)
    }
}
