//! Terminal rendering of filters and results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use mak_filter::{OptionSet, Reset};
use mak_model::{Choice, Dimension, Field, LabelMap};

use crate::session::{Cycle, View};

/// Shown when every row was filtered out. Deliberately bilingual.
pub const NO_RESULTS: &str = "No Results Found / No se encontraron resultados";

pub const NO_DATA: &str = "No data found.";

/// Option lists longer than this are abbreviated.
const MAX_LISTED_OPTIONS: usize = 12;

pub fn render_cycle(cycle: &Cycle) -> String {
    match cycle {
        Cycle::Failed(source_error) => {
            format!("❌ {}\n   {source_error}", source_error.user_message())
        }
        Cycle::NoData => NO_DATA.to_string(),
        Cycle::Ready(view) => render_view(view),
    }
}

pub fn render_view(view: &View) -> String {
    let mut out = String::new();
    out.push_str(&format!("Language: {}\n", view.language));
    out.push_str(&render_filters(view));
    out.push('\n');
    for reset in &view.evaluation.resets {
        out.push_str(&reset_notice(reset, &view.labels));
        out.push('\n');
    }
    if view.evaluation.rows.is_empty() {
        out.push_str(NO_RESULTS);
    } else {
        out.push_str(&render_rows(view));
        out.push('\n');
        out.push_str(&format!("Results: {}", view.evaluation.rows.len()));
    }
    out
}

fn render_filters(view: &View) -> String {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Filter"),
        header_cell("Selected"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    for (dimension, options) in view.evaluation.options.iter() {
        let selected = view.evaluation.selection.get(dimension);
        table.add_row(vec![
            Cell::new(dimension_label(dimension, &view.labels)).add_attribute(Attribute::Bold),
            selected_cell(selected, options),
            Cell::new(option_summary(options)),
        ]);
    }
    table.to_string()
}

fn render_rows(view: &View) -> String {
    let mut table = Table::new();
    table.set_header(
        column_labels(&view.labels)
            .into_iter()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in &view.evaluation.rows {
        table.add_row(row.values().to_vec());
    }
    table.to_string()
}

fn dimension_label(dimension: Dimension, labels: &LabelMap) -> String {
    labels.label(dimension.field()).to_string()
}

fn selected_cell(choice: &Choice, options: &OptionSet) -> Cell {
    match choice {
        Choice::All => dim_cell(choice),
        Choice::Value(_) if !options.supports(choice) => Cell::new(choice).fg(Color::Yellow),
        Choice::Value(_) => Cell::new(choice).fg(Color::Green),
    }
}

/// "All" plus the first few values, with a count of the rest.
pub fn option_summary(options: &OptionSet) -> String {
    let labels = options.labels();
    if labels.len() <= MAX_LISTED_OPTIONS {
        return labels.join(", ");
    }
    let hidden = labels.len() - MAX_LISTED_OPTIONS;
    format!(
        "{}, ... (+{hidden} more)",
        labels[..MAX_LISTED_OPTIONS].join(", ")
    )
}

fn reset_notice(reset: &Reset, labels: &LabelMap) -> String {
    format!(
        "{} '{}' is not available with the other filters; reset to All",
        dimension_label(reset.dimension, labels),
        reset.value
    )
}

pub fn render_help() -> String {
    let filters = Dimension::ORDER
        .iter()
        .map(|dimension| dimension.as_str())
        .collect::<Vec<_>>()
        .join("|");
    format!(
        "Commands:\n  \
         set <{filters}> <value>   choose a value (\"All\" clears)\n  \
         clear <{filters}>         clear one filter\n  \
         reset                      clear every filter\n  \
         lang <english|spanish>     switch catalogue language\n  \
         show                       redraw\n  \
         export <csv|pdf> <path>    write the filtered rows\n  \
         quit                       leave"
    )
}

/// Column header text in export order.
pub fn column_labels(labels: &LabelMap) -> Vec<&str> {
    Field::ALL.iter().map(|field| labels.label(*field)).collect()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use mak_filter::FilterEngine;
    use mak_model::{Row, Selection};

    use super::*;

    fn view(rows: Vec<Row>, selection: &Selection) -> View {
        let mak_filter::Outcome::Ready(evaluation) = FilterEngine::default().evaluate(&rows, selection)
        else {
            panic!("expected data");
        };
        View {
            language: mak_model::Language::English,
            labels: LabelMap::english(),
            evaluation,
        }
    }

    fn shirt(operation: &str) -> Row {
        Row {
            garment: "Shirt".to_string(),
            position: "Collar".to_string(),
            operation: operation.to_string(),
            machine: "M1".to_string(),
            time: "10".to_string(),
            category: "Tops".to_string(),
        }
    }

    #[test]
    fn view_lists_filters_rows_and_count() {
        let text = render_view(&view(vec![shirt("Sew")], &Selection::all()));
        assert!(text.contains("TYPE OF GARMENT"));
        assert!(text.contains("All, Shirt"));
        assert!(text.contains("Results: 1"));
    }

    #[test]
    fn reset_is_announced() {
        let selection = Selection::all().with(Dimension::Garment, "Pants");
        let text = render_view(&view(vec![shirt("Sew")], &selection));
        assert!(text.contains("'Pants' is not available"));
    }

    #[test]
    fn long_option_lists_are_abbreviated() {
        let rows: Vec<Row> = (0..20).map(|index| shirt(&format!("Op {index:02}"))).collect();
        let summary = option_summary(
            view(rows, &Selection::all())
                .evaluation
                .options
                .get(Dimension::Operation),
        );
        assert!(summary.starts_with("All, Op 00"));
        assert!(summary.ends_with("(+9 more)"));
    }

    #[test]
    fn column_labels_follow_export_order() {
        assert_eq!(
            column_labels(&LabelMap::spanish()),
            vec!["TIPO DE PRENDA", "POSICION", "OPERACION", "MAQUINA", "TIEMPO (Segs)", "CATEGORIA"]
        );
    }
}
