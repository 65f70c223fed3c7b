//! Legal dropdown values.

use std::collections::BTreeSet;

use mak_model::{ALL_LABEL, Choice, Dimension, Row};

/// Values a dimension's dropdown may offer. "All" is implicit and always first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    values: Vec<String>,
    forced: Option<String>,
}

impl OptionSet {
    /// Distinct values of `dimension` across `rows`, sorted.
    ///
    /// Blank cells and cells spelling the "All" sentinel are never offered.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a Row>, dimension: Dimension) -> Self {
        let values: BTreeSet<&str> = rows
            .into_iter()
            .map(|row| row.value(dimension))
            .filter(|value| is_offerable(value))
            .collect();
        Self {
            values: values.into_iter().map(str::to_string).collect(),
            forced: None,
        }
    }

    /// Values backed by at least one row.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// A kept selection no row supports, listed after the real values.
    pub fn forced(&self) -> Option<&str> {
        self.forced.as_deref()
    }

    /// Keep `value` visible even though no row supports it.
    pub(crate) fn force(&mut self, value: &str) {
        if !self.values.iter().any(|existing| existing == value) {
            self.forced = Some(value.to_string());
        }
    }

    /// True when the choice is backed by rows or is "All".
    pub fn supports(&self, choice: &Choice) -> bool {
        match choice {
            Choice::All => true,
            Choice::Value(value) => self.values.iter().any(|existing| existing == value),
        }
    }

    /// True when the choice can be shown as selected.
    pub fn contains(&self, choice: &Choice) -> bool {
        self.supports(choice) || choice.value().is_some_and(|value| self.forced() == Some(value))
    }

    pub fn choices(&self) -> Vec<Choice> {
        std::iter::once(Choice::All)
            .chain(self.values.iter().cloned().map(Choice::Value))
            .chain(self.forced.iter().cloned().map(Choice::Value))
            .collect()
    }

    /// Dropdown entries in display order, starting with "All".
    pub fn labels(&self) -> Vec<String> {
        std::iter::once(ALL_LABEL.to_string())
            .chain(self.values.iter().cloned())
            .chain(self.forced.iter().cloned())
            .collect()
    }

    /// Number of dropdown entries, "All" included.
    pub fn len(&self) -> usize {
        1 + self.values.len() + usize::from(self.forced.is_some())
    }

    /// True when "All" is the only entry.
    pub fn is_trivial(&self) -> bool {
        self.len() == 1
    }
}

/// Whether a cell value can appear in a dropdown.
pub(crate) fn is_offerable(value: &str) -> bool {
    !value.is_empty() && value != ALL_LABEL
}

/// One option set per dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSets {
    pub category: OptionSet,
    pub garment: OptionSet,
    pub position: OptionSet,
    pub operation: OptionSet,
}

impl OptionSets {
    pub fn get(&self, dimension: Dimension) -> &OptionSet {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Garment => &self.garment,
            Dimension::Position => &self.position,
            Dimension::Operation => &self.operation,
        }
    }

    pub fn get_mut(&mut self, dimension: Dimension) -> &mut OptionSet {
        match dimension {
            Dimension::Category => &mut self.category,
            Dimension::Garment => &mut self.garment,
            Dimension::Position => &mut self.position,
            Dimension::Operation => &mut self.operation,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &OptionSet)> {
        Dimension::ORDER
            .into_iter()
            .map(|dimension| (dimension, self.get(dimension)))
    }
}
