use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Result, SourceError};
use crate::extract::pad_grid;
use crate::sheets::{Grid, SheetProvider};

/// A workbook exported as one `<sheet title>.csv` file per sheet.
#[derive(Debug, Clone)]
pub struct CsvDirectoryProvider {
    root: PathBuf,
}

impl CsvDirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sheet_files(&self) -> Result<Vec<(String, PathBuf)>> {
        if !self.root.is_dir() {
            return Err(SourceError::NotFound(self.root.display().to_string()));
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                files.push((stem.to_string(), path.clone()));
            }
        }
        files.sort();
        Ok(files)
    }
}

impl SheetProvider for CsvDirectoryProvider {
    fn sheet_titles(&self) -> Result<Vec<String>> {
        Ok(self
            .sheet_files()?
            .into_iter()
            .map(|(title, _)| title)
            .collect())
    }

    fn read_sheet(&self, title: &str) -> Result<Grid> {
        let path = self
            .sheet_files()?
            .into_iter()
            .find(|(stem, _)| stem == title)
            .map(|(_, path)| path)
            .ok_or_else(|| SourceError::MissingSheet {
                name: title.to_string(),
                available: Vec::new(),
            })?;
        debug!(path = %path.display(), "reading sheet file");
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(&path)?;
        let mut grid = Vec::new();
        for record in reader.records() {
            let record = record?;
            grid.push(record.iter().map(str::to_string).collect());
        }
        Ok(pad_grid(grid))
    }
}
