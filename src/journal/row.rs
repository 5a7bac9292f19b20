use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Header row of the persisted log, in column order.
pub const LOG_COLUMNS: [&str; 4] = ["Date", "Pre_Φ", "Post_Φ", "Note"];

/// One journal entry. Rows are never edited once written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogRow {
    #[serde(rename = "Date")]
    pub date: DateTime<Utc>,
    #[serde(rename = "Pre_Φ")]
    pub pre_phi: f64,
    #[serde(rename = "Post_Φ")]
    pub post_phi: f64,
    // Older logs may predate the note column.
    #[serde(rename = "Note", default)]
    pub note: String,
}

impl LogRow {
    pub fn new(date: DateTime<Utc>, pre_phi: f64, post_phi: f64, note: impl Into<String>) -> Self {
        Self {
            date,
            pre_phi,
            post_phi,
            note: note.into(),
        }
    }
}

/// In-memory copy of the whole log, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    rows: Vec<LogRow>,
}

impl LogTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> [&'static str; 4] {
        LOG_COLUMNS
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last(&self) -> Option<&LogRow> {
        self.rows.last()
    }

    pub(crate) fn push(&mut self, row: LogRow) {
        self.rows.push(row);
    }
}

impl From<Vec<LogRow>> for LogTable {
    fn from(rows: Vec<LogRow>) -> Self {
        Self { rows }
    }
}
