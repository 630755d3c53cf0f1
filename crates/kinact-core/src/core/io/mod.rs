//! Loaders for the tabular resources consumed by KSEA.
//!
//! Every loader reads local files only. Fold-change and p-value matrices, prior-knowledge
//! interaction tables and prediction outputs are all turned into the models of
//! [`crate::core::models`] here, so the scoring engine never sees a file format.

pub mod dataset;
pub mod id_mapping;
pub mod networkin;
pub mod ptms;
pub mod table;

use crate::core::models::site::SiteIdError;
use crate::core::models::table::TableError;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("Required column '{column}' not found in '{path}'")]
    MissingColumn { path: String, column: String },
    #[error("Invalid value '{value}' in column '{column}' on line {line} of '{path}'")]
    InvalidValue {
        path: String,
        line: u64,
        column: String,
        value: String,
    },
    #[error("Table error in '{path}': {source}")]
    Table { path: String, source: TableError },
    #[error("Invalid site identifier in '{path}': {source}")]
    Site { path: String, source: SiteIdError },
    #[error("Unknown interaction source '{0}'")]
    UnknownSource(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub(crate) fn path_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

pub(crate) fn open_delimited(
    path: &Path,
    delimiter: u8,
) -> Result<csv::Reader<File>, LoadError> {
    ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(false)
        .from_path(path)
        .map_err(|e| LoadError::Csv {
            path: path_string(path),
            source: e,
        })
}

pub(crate) fn read_headers(
    reader: &mut csv::Reader<File>,
    path: &Path,
) -> Result<StringRecord, LoadError> {
    reader.headers().cloned().map_err(|e| LoadError::Csv {
        path: path_string(path),
        source: e,
    })
}

pub(crate) fn column_index(
    headers: &StringRecord,
    column: &str,
    path: &Path,
) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| LoadError::MissingColumn {
            path: path_string(path),
            column: column.to_string(),
        })
}

/// Parses a numeric cell; empty cells and the usual NA spellings are missing values.
pub(crate) fn parse_optional_f64(
    raw: &str,
    path: &Path,
    line: u64,
    column: &str,
) -> Result<Option<f64>, LoadError> {
    let trimmed = raw.trim();
    match trimmed {
        "" | "NA" | "NaN" | "nan" | "NAN" | "N/A" => Ok(None),
        _ => trimmed
            .parse::<f64>()
            .map(|v| if v.is_nan() { None } else { Some(v) })
            .map_err(|_| LoadError::InvalidValue {
                path: path_string(path),
                line,
                column: column.to_string(),
                value: raw.to_string(),
            }),
    }
}

pub(crate) fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}
