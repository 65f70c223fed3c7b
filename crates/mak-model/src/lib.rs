//! Data model for the operation-time catalogue.
//!
//! Rows come from a remote workbook, one sheet per language. Four of the six
//! row fields are filter dimensions; the rest are display-only.

pub mod catalog;
pub mod config;
pub mod error;
pub mod field;
pub mod row;
pub mod selection;

pub use catalog::{Catalog, LabelMap, Language};
pub use config::{CatalogConfig, LanguageProfile, OptionPolicy, ReconcilePolicy};
pub use error::{ModelError, Result};
pub use field::{Dimension, Field};
pub use row::Row;
pub use selection::{ALL_LABEL, Choice, Selection};
