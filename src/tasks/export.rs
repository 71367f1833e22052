//! Task export
//!
//! Serializes the task list for offline analysis or backup:
//! - CSV with double-quoted text fields
//! - pretty-printed JSON

use chrono::{NaiveDate, SecondsFormat};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use super::types::{ParseEnumError, Task};

/// CSV header row
pub const CSV_HEADERS: [&str; 6] = [
    "Title",
    "Description",
    "Priority",
    "Status",
    "Due Date",
    "Created At",
];

/// Supported export formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// MIME type for this format
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ParseEnumError::new("export format", s)),
        }
    }
}

/// Errors that can occur while exporting
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Render tasks in the requested format
pub fn render(format: ExportFormat, tasks: &[Task]) -> Result<String, ExportError> {
    match format {
        ExportFormat::Csv => format_csv(tasks),
        ExportFormat::Json => format_json(tasks),
    }
}

/// Format as CSV: one header line plus one record per task
pub fn format_csv(tasks: &[Task]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;

    for task in tasks {
        let due_date = task
            .due_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let created_at = task.created_at.to_rfc3339_opts(SecondsFormat::Secs, true);

        writer.write_record([
            task.title.as_str(),
            task.description.as_deref().unwrap_or(""),
            task.priority.as_str(),
            task.status.as_str(),
            due_date.as_str(),
            created_at.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

/// Format as a pretty-printed JSON array
pub fn format_json(tasks: &[Task]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Download name for an export made on `today`
pub fn default_export_filename(format: ExportFormat, today: NaiveDate) -> String {
    format!(
        "tasks_export_{}.{}",
        today.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Render and write an export to `path`, creating parent directories
pub fn write_export(format: ExportFormat, tasks: &[Task], path: &Path) -> Result<(), ExportError> {
    let content = render(format, tasks)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;

    tracing::info!(path = %path.display(), tasks = tasks.len(), format = %format, "Exported tasks");
    Ok(())
}
