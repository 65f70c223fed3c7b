//! Row Source: turns a workbook sheet into catalogue rows.
//!
//! Sheets come from a [`SheetProvider`] (Google Sheets over HTTP, or a
//! directory of CSV exports). [`SheetRowSource`] picks the sheet for a
//! language, skips its header block and extracts rows; [`CachedSource`]
//! memoises the result for a short time.

pub mod cache;
pub mod error;
pub mod extract;
pub mod sheets;
pub mod source;

pub use cache::CachedSource;
pub use error::{Result, SourceError};
pub use extract::{extract_rows, pad_grid};
pub use sheets::{CsvDirectoryProvider, Credentials, GoogleSheetsProvider, Grid, SheetProvider};
pub use source::{RowSource, SheetRowSource, find_sheet};
