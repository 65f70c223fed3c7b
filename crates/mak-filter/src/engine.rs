//! Option computation, reconciliation and the full evaluation cycle.

use mak_model::{CatalogConfig, Choice, Dimension, OptionPolicy, ReconcilePolicy, Row, Selection};
use tracing::{debug, warn};

use crate::filter::apply_filter;
use crate::options::{OptionSet, OptionSets, is_offerable};

/// A selection dropped back to "All" during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reset {
    pub dimension: Dimension,
    /// The value that no longer matched any row.
    pub value: String,
}

/// Outcome of [`FilterEngine::reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub selection: Selection,
    pub resets: Vec<Reset>,
}

/// Everything the presentation layer needs after one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Selection after reconciliation; store it for the next cycle.
    pub selection: Selection,
    pub options: OptionSets,
    /// Rows passing every active filter, in source order.
    pub rows: Vec<Row>,
    pub resets: Vec<Reset>,
}

impl Evaluation {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The source table was empty; nothing else was computed.
    NoData,
    Ready(Evaluation),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterEngine {
    options: OptionPolicy,
    reconcile: ReconcilePolicy,
}

impl FilterEngine {
    pub fn new(options: OptionPolicy, reconcile: ReconcilePolicy) -> Self {
        Self { options, reconcile }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.options, config.reconcile)
    }

    pub fn option_policy(&self) -> OptionPolicy {
        self.options
    }

    pub fn reconcile_policy(&self) -> ReconcilePolicy {
        self.reconcile
    }

    /// Legal values for every dimension under the current selection.
    ///
    /// With the persistent policy a selected value no row supports is still
    /// listed, after the supported ones.
    pub fn compute_options(&self, rows: &[Row], selection: &Selection) -> OptionSets {
        let mut sets = OptionSets::default();
        for dimension in Dimension::ORDER {
            let mut set = match self.options {
                OptionPolicy::Cascading => OptionSet::from_rows(
                    rows.iter().filter(|row| matches_upstream(selection, row, dimension)),
                    dimension,
                ),
                OptionPolicy::Intersective => OptionSet::from_rows(
                    rows.iter()
                        .filter(|row| selection.matches_except(row, Some(dimension))),
                    dimension,
                ),
            };
            if self.reconcile == ReconcilePolicy::Persistent
                && let Some(value) = selection.get(dimension).value()
            {
                set.force(value);
            }
            *sets.get_mut(dimension) = set;
        }
        sets
    }

    /// Repair selections no row can satisfy.
    ///
    /// Dimensions are walked in evaluation order. A value is stale when no row
    /// carries it together with the upstream choices already kept, so an
    /// upstream choice always wins over a conflicting downstream one. Stale
    /// values are reset to "All" and stop constraining later dimensions.
    /// Values no dropdown can offer (blank, or the sentinel text) are always
    /// stale.
    /// The persistent policy keeps every value as is.
    pub fn reconcile(&self, rows: &[Row], selection: &Selection) -> Reconciliation {
        let mut reconciled = selection.clone();
        let mut resets = Vec::new();
        if self.reconcile == ReconcilePolicy::Persistent {
            return Reconciliation {
                selection: reconciled,
                resets,
            };
        }

        let mut remaining: Vec<&Row> = rows.iter().collect();
        for dimension in Dimension::ORDER {
            let Some(value) = selection.get(dimension).value() else {
                continue;
            };
            if is_offerable(value) && remaining.iter().any(|row| row.value(dimension) == value) {
                remaining.retain(|row| row.value(dimension) == value);
            } else {
                warn!(
                    dimension = %dimension,
                    value = %value,
                    "selection no longer matches any row, resetting to All"
                );
                reconciled.set(dimension, Choice::All);
                resets.push(Reset {
                    dimension,
                    value: value.to_string(),
                });
            }
        }
        Reconciliation {
            selection: reconciled,
            resets,
        }
    }

    /// One full cycle: reconcile, compute options, filter.
    pub fn evaluate(&self, rows: &[Row], selection: &Selection) -> Outcome {
        if rows.is_empty() {
            debug!("no data, skipping filter evaluation");
            return Outcome::NoData;
        }
        let Reconciliation { selection, resets } = self.reconcile(rows, selection);
        let options = self.compute_options(rows, &selection);
        let filtered = apply_filter(rows, &selection);
        debug!(
            total = rows.len(),
            matched = filtered.len(),
            resets = resets.len(),
            "filter evaluated"
        );
        Outcome::Ready(Evaluation {
            selection,
            options,
            rows: filtered,
            resets,
        })
    }
}

fn matches_upstream(selection: &Selection, row: &Row, dimension: Dimension) -> bool {
    dimension
        .upstream()
        .iter()
        .all(|upstream| selection.get(*upstream).accepts(row.value(*upstream)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, garment: &str, position: &str, operation: &str) -> Row {
        Row {
            garment: garment.to_string(),
            position: position.to_string(),
            operation: operation.to_string(),
            machine: "M1".to_string(),
            time: "1".to_string(),
            category: category.to_string(),
        }
    }

    #[test]
    fn cascading_ignores_downstream_choices() {
        let rows = vec![
            row("Tops", "Shirt", "Collar", "Sew"),
            row("Bottoms", "Pants", "Waist", "Hem"),
        ];
        let engine = FilterEngine::new(OptionPolicy::Cascading, ReconcilePolicy::AutoReset);
        let selection = Selection::all().with(Dimension::Garment, "Shirt");
        let options = engine.compute_options(&rows, &selection);
        assert_eq!(options.category.labels(), vec!["All", "Bottoms", "Tops"]);
        assert_eq!(options.position.labels(), vec!["All", "Collar"]);
    }

    #[test]
    fn intersective_narrows_upstream_dropdowns() {
        let rows = vec![
            row("Tops", "Shirt", "Collar", "Sew"),
            row("Bottoms", "Pants", "Waist", "Hem"),
        ];
        let engine = FilterEngine::default();
        let selection = Selection::all().with(Dimension::Garment, "Shirt");
        let options = engine.compute_options(&rows, &selection);
        assert_eq!(options.category.labels(), vec!["All", "Tops"]);
        // A dimension's own choice does not narrow its own dropdown.
        assert_eq!(options.garment.labels(), vec!["All", "Pants", "Shirt"]);
    }

    #[test]
    fn reset_cascades_to_later_dimensions() {
        let rows = vec![
            row("Tops", "Shirt", "Collar", "Sew"),
            row("Bottoms", "Pants", "Waist", "Hem"),
        ];
        let engine = FilterEngine::default();
        let selection = Selection::all()
            .with(Dimension::Category, "Tops")
            .with(Dimension::Garment, "Pants")
            .with(Dimension::Position, "Collar");
        let reconciliation = engine.reconcile(&rows, &selection);
        assert_eq!(reconciliation.selection.garment, Choice::All);
        // Garment no longer constrains, so Collar is still valid under Tops.
        assert_eq!(
            reconciliation.selection.position,
            Choice::Value("Collar".to_string())
        );
        assert_eq!(reconciliation.resets.len(), 1);
    }

    #[test]
    fn blank_value_is_reset_even_when_rows_have_blanks() {
        let rows = vec![row("Tops", "Shirt", "", "Sew")];
        let selection = Selection::all().with(Dimension::Position, Choice::Value(String::new()));
        let Outcome::Ready(evaluation) = FilterEngine::default().evaluate(&rows, &selection) else {
            panic!("expected data");
        };
        assert_eq!(evaluation.selection.position, Choice::All);
        assert_eq!(evaluation.options.position.labels(), vec!["All"]);
        assert!(evaluation.options.position.supports(&evaluation.selection.position));
        assert_eq!(
            evaluation.resets,
            vec![Reset {
                dimension: Dimension::Position,
                value: String::new(),
            }]
        );
        assert_eq!(evaluation.rows, rows);
    }

    #[test]
    fn sentinel_text_in_data_cannot_be_kept() {
        let rows = vec![row("Tops", "All", "Collar", "Sew")];
        let selection = Selection::all().with(Dimension::Garment, Choice::Value("All".to_string()));
        let reconciliation = FilterEngine::default().reconcile(&rows, &selection);
        assert_eq!(reconciliation.selection.garment, Choice::All);
        assert_eq!(reconciliation.resets.len(), 1);
    }
}
