//! Sheet grid to catalogue rows.

use mak_model::Row;

use crate::sheets::Grid;

/// Minimum cell count for a data row: an unused leading column plus six fields.
const MIN_CELLS: usize = 7;

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Pad every row to the width of the widest one.
///
/// Remote APIs drop trailing empty cells; extraction expects a rectangular grid.
pub fn pad_grid(mut grid: Grid) -> Grid {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, String::new());
    }
    grid
}

/// Extract rows below the header block.
///
/// Columns 1 through 6 hold garment, position, operation, machine, time and
/// category. Short rows and rows without a garment or operation are skipped.
pub fn extract_rows(grid: &[Vec<String>], start_row: usize) -> Vec<Row> {
    grid.iter()
        .skip(start_row)
        .filter(|cells| cells.len() >= MIN_CELLS)
        .map(|cells| Row {
            garment: normalize_cell(&cells[1]),
            position: normalize_cell(&cells[2]),
            operation: normalize_cell(&cells[3]),
            machine: normalize_cell(&cells[4]),
            time: normalize_cell(&cells[5]),
            category: normalize_cell(&cells[6]),
        })
        .filter(Row::is_meaningful)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Grid {
        rows.iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect()
    }

    #[test]
    fn skips_header_block_and_trims_values() {
        let data = grid(&[
            &["", "MAK", "", "", "", "", ""],
            &["#", "GARMENT", "POSITION", "OPERATION", "MACHINE", "TIME", "CATEGORY"],
            &["1", " Shirt ", "Collar", "Sew", "M1", "10", "Tops "],
        ]);
        let rows = extract_rows(&data, 2);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].garment, "Shirt");
        assert_eq!(rows[0].category, "Tops");
    }

    #[test]
    fn drops_short_and_blank_rows() {
        let data = grid(&[
            &["1", "Shirt", "Collar", "Sew", "M1", "10"],
            &["2", "  ", "Cuff", "", "M1", "4", "Tops"],
            &["3", "", "Cuff", "Hem", "M2", "4", "Tops"],
        ]);
        let rows = extract_rows(&data, 0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].operation, "Hem");
    }

    #[test]
    fn pad_grid_makes_rows_rectangular() {
        let padded = pad_grid(grid(&[&["a"], &["a", "b", "c"]]));
        assert!(padded.iter().all(|row| row.len() == 3));
        assert_eq!(padded[0][2], "");
    }
}
