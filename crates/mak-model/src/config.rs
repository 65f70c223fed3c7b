//! Viewer configuration.
//!
//! Everything here is external data: sheet names, header offsets and labels
//! change with the workbook, not with the code.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{LabelMap, Language};
use crate::error::{ModelError, Result};

/// Workbook shared by the catalogue team.
pub const DEFAULT_SPREADSHEET_KEY: &str = "1Hd-NGFEKJudVRcinsnN7G8LUrtWg6bdk9xACs0tm_kc";

pub const DEFAULT_TITLE: &str = "MAK - CATALOGO DE TIEMPOS";

/// How each dropdown's legal values are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionPolicy {
    /// Only upstream selections constrain a dimension.
    Cascading,
    /// Every other dimension's selection constrains a dimension.
    #[default]
    Intersective,
}

/// What happens to a selection no row can satisfy any more.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcilePolicy {
    /// Drop it back to "All".
    #[default]
    AutoReset,
    /// Keep it and list it as an option anyway.
    Persistent,
}

/// Where a language's rows live inside the workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Sheet title, matched case-insensitively.
    pub sheet: String,
    /// Leading rows to discard before data begins.
    pub start_row: usize,
    pub labels: LabelMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub spreadsheet_key: String,
    pub title: String,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    pub options: OptionPolicy,
    pub reconcile: ReconcilePolicy,
    pub profiles: BTreeMap<Language, LanguageProfile>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            Language::English,
            LanguageProfile {
                sheet: "English".to_string(),
                start_row: 2,
                labels: LabelMap::english(),
            },
        );
        profiles.insert(
            Language::Spanish,
            LanguageProfile {
                sheet: "Spanish".to_string(),
                start_row: 9,
                labels: LabelMap::spanish(),
            },
        );
        Self {
            spreadsheet_key: DEFAULT_SPREADSHEET_KEY.to_string(),
            title: DEFAULT_TITLE.to_string(),
            cache_ttl_secs: 60,
            request_timeout_secs: 30,
            options: OptionPolicy::default(),
            reconcile: ReconcilePolicy::default(),
            profiles,
        }
    }
}

impl CatalogConfig {
    pub fn profile(&self, language: Language) -> Result<&LanguageProfile> {
        self.profiles
            .get(&language)
            .ok_or_else(|| ModelError::MissingProfile(language.to_string()))
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
