use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use super::row::{LogRow, LogTable, LOG_COLUMNS};
use crate::error::EchoError;
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// Flat CSV journal with header `Date,Pre_Φ,Post_Φ,Note`.
///
/// Every append reads the whole file and rewrites it. Only one writer may use a
/// given path at a time; concurrent writers silently lose each other's rows.
#[derive(Debug, Clone)]
pub struct SessionLog {
    path: PathBuf,
}

/// Result of a successful append.
#[derive(Debug)]
pub struct Appended {
    pub table: LogTable,
    /// Set when the previous file could not be read and the log was restarted.
    pub recovered_from: Option<EchoError>,
}

impl SessionLog {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full table, or explain why it could not be read.
    pub fn try_load(&self) -> Result<LogTable, EchoError> {
        let corrupt = |reason: String| EchoError::MissingOrCorruptLog {
            path: self.path.clone(),
            reason,
        };

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| corrupt(e.to_string()))?;
        let rows = reader
            .deserialize::<LogRow>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| corrupt(e.to_string()))?;
        Ok(LogTable::from(rows))
    }

    /// Read the full table, falling back to an empty one when the file is absent
    /// or unreadable.
    pub fn load(&self) -> LogTable {
        self.load_or_recover().0
    }

    fn load_or_recover(&self) -> (LogTable, Option<EchoError>) {
        if !self.path.exists() {
            log_info!("No session log at {}; starting empty", self.path.display());
            return (LogTable::new(), None);
        }

        match self.try_load() {
            Ok(table) => (table, None),
            Err(err) => {
                log_warn!("{err}");
                (LogTable::new(), Some(err))
            }
        }
    }

    /// Append `row` after all existing rows and rewrite the file.
    ///
    /// A missing or corrupt file does not fail the append; it is replaced by a
    /// table holding only the new row.
    pub fn append(&self, row: LogRow) -> Result<Appended> {
        let (mut table, recovered_from) = self.load_or_recover();
        table.push(row);
        self.persist(&table)?;

        log_info!(
            "Appended session log row {} to {}",
            table.len(),
            self.path.display()
        );

        Ok(Appended {
            table,
            recovered_from,
        })
    }

    fn persist(&self, table: &LogTable) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create session log directory {}", parent.display())
            })?;
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp_path)
                .with_context(|| format!("failed to open {}", tmp_path.display()))?;
            writer
                .write_record(LOG_COLUMNS)
                .context("failed to write session log header")?;
            for row in table.rows() {
                writer
                    .serialize(row)
                    .context("failed to write session log row")?;
            }
            writer.flush().context("failed to flush session log")?;
        }

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "failed to move {} into place at {}",
                tmp_path.display(),
                self.path.display()
            )
        })
    }
}
