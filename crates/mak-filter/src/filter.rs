use mak_model::{Row, Selection};

/// Rows satisfying every non-"All" choice by exact string equality.
pub fn apply_filter(rows: &[Row], selection: &Selection) -> Vec<Row> {
    rows.iter()
        .filter(|row| selection.matches(row))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use mak_model::Dimension;

    use super::*;

    fn row(garment: &str, category: &str) -> Row {
        Row {
            garment: garment.to_string(),
            category: category.to_string(),
            operation: "Sew".to_string(),
            ..Row::default()
        }
    }

    #[test]
    fn unconstrained_selection_keeps_everything() {
        let rows = vec![row("Shirt", "Tops"), row("Pants", "Bottoms")];
        assert_eq!(apply_filter(&rows, &Selection::all()), rows);
    }

    #[test]
    fn preserves_source_order() {
        let rows = vec![row("Vest", "Tops"), row("Pants", "Bottoms"), row("Shirt", "Tops")];
        let selection = Selection::all().with(Dimension::Category, "Tops");
        let garments: Vec<String> = apply_filter(&rows, &selection)
            .into_iter()
            .map(|row| row.garment)
            .collect();
        assert_eq!(garments, vec!["Vest", "Shirt"]);
    }
}
