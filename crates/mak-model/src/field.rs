//! Canonical row fields and the subset of them that can be filtered on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// One of the six columns extracted from a catalogue sheet.
///
/// Declaration order is the export column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Garment,
    Position,
    Operation,
    Machine,
    Time,
    Category,
}

impl Field {
    /// Fixed export column order.
    pub const ALL: [Field; 6] = [
        Field::Garment,
        Field::Position,
        Field::Operation,
        Field::Machine,
        Field::Time,
        Field::Category,
    ];

    /// Canonical upper-case name, used when no display label is known.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Field::Garment => "GARMENT",
            Field::Position => "POSITION",
            Field::Operation => "OPERATION",
            Field::Machine => "MACHINE",
            Field::Time => "TIME",
            Field::Category => "CATEGORY",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for Field {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.canonical_name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// A filterable field. Evaluation order is category, garment, position,
/// operation, which is also the order dropdowns are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Garment,
    Position,
    Operation,
}

impl Dimension {
    /// Dimensions in evaluation order.
    pub const ORDER: [Dimension; 4] = [
        Dimension::Category,
        Dimension::Garment,
        Dimension::Position,
        Dimension::Operation,
    ];

    pub fn index(self) -> usize {
        match self {
            Dimension::Category => 0,
            Dimension::Garment => 1,
            Dimension::Position => 2,
            Dimension::Operation => 3,
        }
    }

    pub fn field(self) -> Field {
        match self {
            Dimension::Category => Field::Category,
            Dimension::Garment => Field::Garment,
            Dimension::Position => Field::Position,
            Dimension::Operation => Field::Operation,
        }
    }

    /// Dimensions evaluated before this one.
    pub fn upstream(self) -> &'static [Dimension] {
        &Self::ORDER[..self.index()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Garment => "garment",
            Dimension::Position => "position",
            Dimension::Operation => "operation",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Dimension::ORDER
            .into_iter()
            .find(|dimension| dimension.as_str() == key)
            .ok_or_else(|| ModelError::UnknownDimension(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_follows_evaluation_order() {
        assert!(Dimension::Category.upstream().is_empty());
        assert_eq!(
            Dimension::Position.upstream(),
            &[Dimension::Category, Dimension::Garment]
        );
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Garment".parse::<Dimension>(), Ok(Dimension::Garment));
        assert_eq!(" time ".parse::<Field>(), Ok(Field::Time));
        assert!("colour".parse::<Dimension>().is_err());
    }
}
