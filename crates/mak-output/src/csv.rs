use ::csv::{ReaderBuilder, Writer};
use mak_model::{Field, LabelMap, Row};

use crate::error::{ExportError, Result};

/// Labelled header followed by one record per row, in [`Field::ALL`] order.
pub fn write_csv(rows: &[Row], labels: &LabelMap) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(labels.headers())?;
    for row in rows {
        writer.write_record(row.values())?;
    }
    writer
        .into_inner()
        .map_err(|error| ExportError::Buffer(error.to_string()))
}

/// Read back a file produced by [`write_csv`]. Columns are positional; the
/// header row is skipped whatever its labels.
pub fn read_csv(bytes: &[u8]) -> Result<Vec<Row>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() != Field::ALL.len() {
            return Err(ExportError::ColumnCount {
                expected: Field::ALL.len(),
                found: record.len(),
            });
        }
        let cell = |index: usize| record.get(index).unwrap_or_default().trim().to_string();
        rows.push(Row {
            garment: cell(0),
            position: cell(1),
            operation: cell(2),
            machine: cell(3),
            time: cell(4),
            category: cell(5),
        });
    }
    Ok(rows)
}
