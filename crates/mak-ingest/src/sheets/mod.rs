//! Workbook access.

mod csv_dir;
mod google;

pub use csv_dir::CsvDirectoryProvider;
pub use google::{Credentials, GoogleSheetsProvider};

use crate::error::Result;

/// All cell values of one sheet, row-major, padded to a common width.
pub type Grid = Vec<Vec<String>>;

/// A workbook made of titled sheets.
pub trait SheetProvider {
    /// Titles of every sheet, as stored.
    fn sheet_titles(&self) -> Result<Vec<String>>;

    /// Every cell value of the sheet with exactly this title.
    fn read_sheet(&self, title: &str) -> Result<Grid>;
}

impl<P: SheetProvider + ?Sized> SheetProvider for Box<P> {
    fn sheet_titles(&self) -> Result<Vec<String>> {
        (**self).sheet_titles()
    }

    fn read_sheet(&self, title: &str) -> Result<Grid> {
        (**self).read_sheet(title)
    }
}
