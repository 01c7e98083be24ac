#![deny(clippy::all, missing_docs, rust_2018_idioms)]
#![warn(clippy::pedantic)]

//! Structured JSON-lines audit logging shared across rfplens modules.

use std::{
    fs::{self, File, OpenOptions},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit severity level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditLevel {
    /// Diagnostic detail.
    Debug,
    /// Normal pipeline progress.
    Info,
    /// Degraded but recoverable condition.
    Warn,
    /// Operation failure.
    Error,
}

/// One structured audit entry, serialized as a single JSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// UTC timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Component emitting the record (e.g. `analysis.compare`).
    pub component: String,
    /// Severity.
    pub level: AuditLevel,
    /// Short machine-readable action name (e.g. `compare.completed`).
    pub action: String,
    /// Arbitrary JSON payload with metrics and context.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub details: serde_json::Map<String, serde_json::Value>,
    /// Correlation id tying records of one run together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation: Option<Uuid>,
}

impl AuditRecord {
    /// Creates a record with an empty payload and no correlation id.
    #[must_use]
    pub fn new(component: impl Into<String>, level: AuditLevel, action: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            component: component.into(),
            level,
            action: action.into(),
            details: serde_json::Map::new(),
            correlation: None,
        }
    }

    /// Attaches a JSON payload. Non-object values are stored under `"value"`.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        match details {
            serde_json::Value::Object(map) => self.details = map,
            other => {
                self.details.insert("value".into(), other);
            }
        }
        self
    }

    /// Attaches a correlation id.
    #[must_use]
    pub fn with_correlation(mut self, correlation: Uuid) -> Self {
        self.correlation = Some(correlation);
        self
    }
}

/// Thread-safe append-only JSON-lines audit writer.
#[derive(Debug)]
pub struct AuditLogger {
    path: PathBuf,
    writer: Mutex<File>,
}

impl AuditLogger {
    /// Creates or opens an audit log at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating audit directory for {}", path.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening audit log {}", path.display()))?;
        Ok(Self {
            path,
            writer: Mutex::new(file),
        })
    }

    /// Appends a record as one JSON line and flushes it.
    pub fn write(&self, record: &AuditRecord) -> Result<()> {
        let mut writer = self.writer.lock();
        serde_json::to_writer(&mut *writer, record)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Returns the underlying file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Reads every record from a JSON-lines audit file, skipping blank lines.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<AuditRecord>> {
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("opening audit log {}", path.display()))?;
    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: AuditRecord = serde_json::from_str(&line)
            .with_context(|| format!("malformed audit line in {}", path.display()))?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn writes_and_reads_json_lines() {
        let dir = tempdir().unwrap();
        let logger = AuditLogger::open(dir.path().join("audit.log")).unwrap();
        let correlation = Uuid::new_v4();
        logger
            .write(
                &AuditRecord::new("analysis.compare", AuditLevel::Info, "compare.completed")
                    .with_details(json!({ "sections": 3 }))
                    .with_correlation(correlation),
            )
            .unwrap();

        let records = read_records(logger.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].action, "compare.completed");
        assert_eq!(records[0].correlation, Some(correlation));
        assert_eq!(records[0].details["sections"], json!(3));
    }

    #[test]
    fn non_object_details_are_wrapped() {
        let record = AuditRecord::new("cli", AuditLevel::Debug, "boot")
            .with_details(json!("plain string"));
        assert_eq!(record.details["value"], json!("plain string"));
    }
}
