//! A fetched catalogue: rows plus the labels of the language they came in.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::field::Field;
use crate::row::Row;

/// Catalogue language. Each language lives on its own sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Spanish];

    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "spanish" | "es" | "espanol" | "español" => Ok(Language::Spanish),
            _ => Err(ModelError::UnknownLanguage(s.to_string())),
        }
    }
}

/// Display labels keyed by canonical field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelMap(BTreeMap<Field, String>);

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, field: Field, label: impl Into<String>) -> Self {
        self.0.insert(field, label.into());
        self
    }

    /// Display label, falling back to the canonical field name.
    pub fn label(&self, field: Field) -> &str {
        self.0
            .get(&field)
            .map_or_else(|| field.canonical_name(), String::as_str)
    }

    /// Labels in export column order.
    pub fn headers(&self) -> Vec<String> {
        Field::ALL
            .iter()
            .map(|field| self.label(*field).to_string())
            .collect()
    }

    pub fn english() -> Self {
        Self::new()
            .with(Field::Garment, "TYPE OF GARMENT")
            .with(Field::Position, "POSITION")
            .with(Field::Operation, "OPERATION")
            .with(Field::Machine, "MACHINE")
            .with(Field::Time, "TIME (Secs)")
            .with(Field::Category, "CATEGORY")
    }

    pub fn spanish() -> Self {
        Self::new()
            .with(Field::Garment, "TIPO DE PRENDA")
            .with(Field::Position, "POSICION")
            .with(Field::Operation, "OPERACION")
            .with(Field::Machine, "MAQUINA")
            .with(Field::Time, "TIEMPO (Segs)")
            .with(Field::Category, "CATEGORIA")
    }
}

/// Result of one successful Row Source fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub language: Language,
    pub rows: Vec<Row>,
    pub labels: LabelMap,
}

impl Catalog {
    pub fn new(language: Language, rows: Vec<Row>, labels: LabelMap) -> Self {
        Self {
            language,
            rows,
            labels,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
