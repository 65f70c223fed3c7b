//! Per-dimension filter state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Dimension;
use crate::row::Row;

/// Display text of the unconstrained choice.
///
/// A cell holding exactly this text cannot be told apart from the sentinel,
/// so it is never offered or kept as a filter value.
pub const ALL_LABEL: &str = "All";

/// The value chosen for one dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Choice {
    #[default]
    All,
    Value(String),
}

impl Choice {
    /// Interpret user input. Blank input and the literal sentinel mean "All".
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ALL_LABEL {
            Choice::All
        } else {
            Choice::Value(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Choice::All => None,
            Choice::Value(value) => Some(value),
        }
    }

    /// Exact string equality; "All" accepts everything.
    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Value(value) => value == candidate,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL_LABEL),
            Choice::Value(value) => f.write_str(value),
        }
    }
}

impl From<&str> for Choice {
    fn from(raw: &str) -> Self {
        Choice::parse(raw)
    }
}

/// Current choice for every dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub category: Choice,
    pub garment: Choice,
    pub position: Choice,
    pub operation: Choice,
}

impl Selection {
    /// Every dimension unconstrained.
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, dimension: Dimension, choice: impl Into<Choice>) -> Self {
        self.set(dimension, choice.into());
        self
    }

    pub fn get(&self, dimension: Dimension) -> &Choice {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Garment => &self.garment,
            Dimension::Position => &self.position,
            Dimension::Operation => &self.operation,
        }
    }

    pub fn set(&mut self, dimension: Dimension, choice: Choice) {
        let slot = match dimension {
            Dimension::Category => &mut self.category,
            Dimension::Garment => &mut self.garment,
            Dimension::Position => &mut self.position,
            Dimension::Operation => &mut self.operation,
        };
        *slot = choice;
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.set(dimension, Choice::All);
    }

    /// Set every dimension back to "All".
    pub fn reset(&mut self) {
        *self = Self::all();
    }

    pub fn is_unconstrained(&self) -> bool {
        Dimension::ORDER
            .iter()
            .all(|dimension| self.get(*dimension).is_all())
    }

    /// Dimensions carrying a concrete value, in evaluation order.
    pub fn active(&self) -> impl Iterator<Item = (Dimension, &str)> {
        Dimension::ORDER
            .into_iter()
            .filter_map(|dimension| self.get(dimension).value().map(|value| (dimension, value)))
    }

    /// True when the row satisfies every constraint.
    pub fn matches(&self, row: &Row) -> bool {
        self.matches_except(row, None)
    }

    /// True when the row satisfies every constraint except the skipped one.
    pub fn matches_except(&self, row: &Row, skip: Option<Dimension>) -> bool {
        Dimension::ORDER
            .into_iter()
            .filter(|dimension| Some(*dimension) != skip)
            .all(|dimension| self.get(dimension).accepts(row.value(dimension)))
    }
}
