//! The Row Source contract and its workbook-backed implementation.

use std::collections::BTreeMap;
use std::time::Instant;

use mak_model::{Catalog, CatalogConfig, Language, LanguageProfile};
use tracing::{debug, info, info_span};

use crate::error::{Result, SourceError};
use crate::extract::extract_rows;
use crate::sheets::SheetProvider;

/// Supplies the catalogue for a language.
///
/// Implementations must be safe to call repeatedly. Every upstream failure
/// is reported as a [`SourceError`]; nothing panics past this boundary.
pub trait RowSource {
    fn fetch(&self, language: Language) -> Result<Catalog>;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn fetch(&self, language: Language) -> Result<Catalog> {
        (**self).fetch(language)
    }
}

impl<S: RowSource + ?Sized> RowSource for &S {
    fn fetch(&self, language: Language) -> Result<Catalog> {
        (**self).fetch(language)
    }
}

/// Case-insensitive, whitespace-tolerant sheet title lookup.
pub fn find_sheet<'a>(titles: &'a [String], target: &str) -> Option<&'a str> {
    let wanted = target.trim().to_lowercase();
    titles
        .iter()
        .find(|title| title.trim().to_lowercase() == wanted)
        .map(String::as_str)
}

/// Reads the language's sheet from a workbook and extracts rows from it.
pub struct SheetRowSource<P> {
    provider: P,
    profiles: BTreeMap<Language, LanguageProfile>,
}

impl<P: SheetProvider> SheetRowSource<P> {
    pub fn new(provider: P, config: &CatalogConfig) -> Self {
        Self {
            provider,
            profiles: config.profiles.clone(),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn profile(&self, language: Language) -> Result<&LanguageProfile> {
        self.profiles.get(&language).ok_or_else(|| {
            SourceError::Configuration(format!("no sheet profile for language {language}"))
        })
    }
}

impl<P: SheetProvider> RowSource for SheetRowSource<P> {
    fn fetch(&self, language: Language) -> Result<Catalog> {
        let profile = self.profile(language)?;
        let span = info_span!("fetch", language = %language, sheet = %profile.sheet);
        let _guard = span.enter();
        let start = Instant::now();

        let titles = self.provider.sheet_titles()?;
        let title = find_sheet(&titles, &profile.sheet).ok_or_else(|| {
            SourceError::MissingSheet {
                name: profile.sheet.clone(),
                available: titles.clone(),
            }
        })?;
        let grid = self.provider.read_sheet(title)?;
        debug!(
            grid_rows = grid.len(),
            start_row = profile.start_row,
            "sheet read"
        );
        if grid.len() <= profile.start_row {
            return Err(SourceError::EmptySheet(profile.sheet.clone()));
        }

        let rows = extract_rows(&grid, profile.start_row);
        info!(
            row_count = rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "fetch complete"
        );
        Ok(Catalog::new(language, rows, profile.labels.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_sheet_ignores_case_and_padding() {
        let titles = vec!["English ".to_string(), "SPANISH".to_string()];
        assert_eq!(find_sheet(&titles, "spanish"), Some("SPANISH"));
        assert_eq!(find_sheet(&titles, " english"), Some("English "));
        assert_eq!(find_sheet(&titles, "French"), None);
    }
}
