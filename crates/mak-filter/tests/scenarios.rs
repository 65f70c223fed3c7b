//! End-to-end filter scenarios over a two-row catalogue.

use mak_filter::{FilterEngine, Outcome, apply_filter};
use mak_model::{Choice, Dimension, OptionPolicy, ReconcilePolicy, Row, Selection};

fn row(garment: &str, category: &str, position: &str, operation: &str, machine: &str, time: &str) -> Row {
    Row {
        garment: garment.to_string(),
        position: position.to_string(),
        operation: operation.to_string(),
        machine: machine.to_string(),
        time: time.to_string(),
        category: category.to_string(),
    }
}

fn catalogue() -> Vec<Row> {
    vec![
        row("Shirt", "Tops", "Collar", "Sew", "M1", "10"),
        row("Pants", "Bottoms", "Waist", "Hem", "M2", "5"),
    ]
}

fn ready(outcome: Outcome) -> mak_filter::Evaluation {
    match outcome {
        Outcome::Ready(evaluation) => evaluation,
        Outcome::NoData => panic!("expected data"),
    }
}

#[test]
fn category_narrows_garments_under_cascading_policy() {
    let rows = catalogue();
    let engine = FilterEngine::new(OptionPolicy::Cascading, ReconcilePolicy::AutoReset);
    let selection = Selection::all().with(Dimension::Category, "Tops");

    let evaluation = ready(engine.evaluate(&rows, &selection));

    assert_eq!(evaluation.rows, vec![rows[0].clone()]);
    assert_eq!(evaluation.options.garment.labels(), vec!["All", "Shirt"]);
    assert!(evaluation.resets.is_empty());
}

#[test]
fn stale_garment_is_reset_under_auto_reset() {
    let rows = catalogue();
    let engine = FilterEngine::new(OptionPolicy::Intersective, ReconcilePolicy::AutoReset);
    let selection = Selection::all()
        .with(Dimension::Category, "Tops")
        .with(Dimension::Garment, "Pants");

    let evaluation = ready(engine.evaluate(&rows, &selection));

    assert_eq!(evaluation.selection.garment, Choice::All);
    assert_eq!(
        evaluation.selection.category,
        Choice::Value("Tops".to_string())
    );
    assert_eq!(evaluation.rows, vec![rows[0].clone()]);
    assert_eq!(evaluation.resets.len(), 1);
    assert_eq!(evaluation.resets[0].dimension, Dimension::Garment);
    assert_eq!(evaluation.resets[0].value, "Pants");
    assert_eq!(evaluation.options.garment.labels(), vec!["All", "Shirt"]);
}

#[test]
fn stale_garment_is_kept_under_persistent_policy() {
    let rows = catalogue();
    let engine = FilterEngine::new(OptionPolicy::Intersective, ReconcilePolicy::Persistent);
    let selection = Selection::all()
        .with(Dimension::Category, "Tops")
        .with(Dimension::Garment, "Pants");

    let evaluation = ready(engine.evaluate(&rows, &selection));

    assert_eq!(
        evaluation.selection.garment,
        Choice::Value("Pants".to_string())
    );
    assert!(evaluation.is_empty());
    assert!(evaluation.resets.is_empty());
    assert!(
        evaluation
            .options
            .garment
            .labels()
            .contains(&"Pants".to_string())
    );
    assert!(
        evaluation
            .options
            .category
            .labels()
            .contains(&"Tops".to_string())
    );
}

#[test]
fn empty_catalogue_reports_no_data() {
    let rows: Vec<Row> = Vec::new();
    let engine = FilterEngine::default();
    let selection = Selection::all().with(Dimension::Operation, "Sew");

    assert_eq!(engine.evaluate(&rows, &selection), Outcome::NoData);

    let options = engine.compute_options(&rows, &selection);
    for (_, set) in options.iter() {
        assert_eq!(set.labels(), vec!["All"]);
    }
    assert!(apply_filter(&rows, &selection).is_empty());
}

#[test]
fn dimension_without_values_still_offers_all() {
    let rows = vec![row("Shirt", "Tops", "", "Sew", "M1", "10")];
    let evaluation = ready(FilterEngine::default().evaluate(&rows, &Selection::all()));
    assert!(evaluation.options.position.is_trivial());
}

#[test]
fn reset_selection_returns_whole_catalogue() {
    let rows = catalogue();
    let mut selection = Selection::all()
        .with(Dimension::Category, "Bottoms")
        .with(Dimension::Operation, "Hem");
    assert_eq!(apply_filter(&rows, &selection).len(), 1);
    selection.reset();
    assert_eq!(apply_filter(&rows, &selection), rows);
}

#[test]
fn reconciled_selection_is_stable() {
    let rows = catalogue();
    let engine = FilterEngine::default();
    let selection = Selection::all()
        .with(Dimension::Garment, "Pants")
        .with(Dimension::Position, "Collar");

    let first = ready(engine.evaluate(&rows, &selection));
    let second = ready(engine.evaluate(&rows, &first.selection));

    assert_eq!(first.selection, second.selection);
    assert!(second.resets.is_empty());
    assert_eq!(first.rows, second.rows);
}
