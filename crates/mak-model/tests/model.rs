//! Tests for mak-model types.

use mak_model::{
    CatalogConfig, Choice, Dimension, Field, LabelMap, Language, OptionPolicy, ReconcilePolicy,
    Row, Selection,
};

fn shirt() -> Row {
    Row {
        garment: "Shirt".to_string(),
        position: "Collar".to_string(),
        operation: "Sew".to_string(),
        machine: "M1".to_string(),
        time: "10".to_string(),
        category: "Tops".to_string(),
    }
}

#[test]
fn row_values_follow_export_order() {
    assert_eq!(
        shirt().values(),
        ["Shirt", "Collar", "Sew", "M1", "10", "Tops"]
    );
    assert_eq!(shirt().value(Dimension::Category), "Tops");
}

#[test]
fn rows_without_garment_or_operation_are_not_meaningful() {
    let mut row = shirt();
    row.garment.clear();
    assert!(row.is_meaningful());
    row.operation.clear();
    assert!(!row.is_meaningful());
}

#[test]
fn reset_clears_every_dimension() {
    let mut selection = Selection::all()
        .with(Dimension::Category, "Tops")
        .with(Dimension::Operation, "Sew");
    assert_eq!(selection.active().count(), 2);
    selection.reset();
    assert!(selection.is_unconstrained());
    assert_eq!(selection, Selection::all());
}

#[test]
fn active_dimensions_come_in_evaluation_order() {
    let selection = Selection::all()
        .with(Dimension::Operation, "Sew")
        .with(Dimension::Category, "Tops");
    let active: Vec<_> = selection.active().collect();
    assert_eq!(
        active,
        vec![(Dimension::Category, "Tops"), (Dimension::Operation, "Sew")]
    );
}

#[test]
fn label_map_falls_back_to_canonical_name() {
    let labels = LabelMap::new().with(Field::Garment, "PRENDA");
    assert_eq!(labels.label(Field::Garment), "PRENDA");
    assert_eq!(labels.label(Field::Machine), "MACHINE");
    assert_eq!(labels.headers().len(), 6);
}

#[test]
fn language_parses_short_and_long_names() {
    assert_eq!("es".parse::<Language>(), Ok(Language::Spanish));
    assert_eq!("English".parse::<Language>(), Ok(Language::English));
    assert!("fr".parse::<Language>().is_err());
}

#[test]
fn default_config_has_both_profiles() {
    let config = CatalogConfig::default();
    let english = config.profile(Language::English).expect("english profile");
    let spanish = config.profile(Language::Spanish).expect("spanish profile");
    assert_eq!(english.start_row, 2);
    assert_eq!(spanish.start_row, 9);
    assert_eq!(spanish.labels.label(Field::Garment), "TIPO DE PRENDA");
    assert_eq!(spanish.labels.label(Field::Time), "TIEMPO (Segs)");
    assert_eq!(spanish.labels.label(Field::Category), "CATEGORIA");
    assert_eq!(config.options, OptionPolicy::Intersective);
    assert_eq!(config.reconcile, ReconcilePolicy::AutoReset);
    assert_eq!(config.cache_ttl().as_secs(), 60);
}

#[test]
fn config_round_trips_through_json() {
    let config = CatalogConfig::default();
    let json = serde_json::to_string(&config).expect("serialize config");
    assert!(json.contains("\"auto-reset\""));
    let round: CatalogConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(round, config);
}

#[test]
fn partial_config_keeps_defaults() {
    let config: CatalogConfig =
        serde_json::from_str(r#"{"reconcile": "persistent", "cache_ttl_secs": 5}"#)
            .expect("deserialize partial config");
    assert_eq!(config.reconcile, ReconcilePolicy::Persistent);
    assert_eq!(config.cache_ttl_secs, 5);
    assert_eq!(config.profiles.len(), 2);
}

#[test]
fn choice_display_uses_sentinel() {
    assert_eq!(Choice::All.to_string(), "All");
    assert_eq!(Choice::from("Pants").to_string(), "Pants");
}
