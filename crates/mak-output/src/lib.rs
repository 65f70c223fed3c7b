//! Export adapters for the filtered catalogue.
//!
//! - **CSV**: display-labelled header, fixed column order, UTF-8
//! - **PDF**: A4 landscape, bordered table with fixed column widths, Latin-1 text

mod csv;
mod error;
mod pdf;

use std::fs;
use std::path::Path;

use mak_model::{LabelMap, Row};
use tracing::info;

pub use crate::csv::{read_csv, write_csv};
pub use error::{ExportError, Result};
pub use pdf::{COLUMN_WIDTHS_MM, encode_latin1, write_pdf, write_pdf_at};

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// Serialise rows in the given format.
pub fn render(format: ExportFormat, rows: &[Row], labels: &LabelMap, title: &str) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Csv => write_csv(rows, labels),
        ExportFormat::Pdf => Ok(write_pdf(rows, labels, title)),
    }
}

/// Serialise rows and write them to `path`, creating parent directories.
pub fn export_to_path(
    format: ExportFormat,
    path: &Path,
    rows: &[Row],
    labels: &LabelMap,
    title: &str,
) -> Result<usize> {
    let bytes = render(format, rows, labels, title)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &bytes)?;
    info!(
        format = format.extension(),
        path = %path.display(),
        rows = rows.len(),
        bytes = bytes.len(),
        "export written"
    );
    Ok(bytes.len())
}
