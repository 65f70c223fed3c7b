use serde::{Deserialize, Serialize};

use crate::field::{Dimension, Field};

/// One catalogue entry. Values are trimmed at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Row {
    pub garment: String,
    pub position: String,
    pub operation: String,
    pub machine: String,
    pub time: String,
    pub category: String,
}

impl Row {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Garment => &self.garment,
            Field::Position => &self.position,
            Field::Operation => &self.operation,
            Field::Machine => &self.machine,
            Field::Time => &self.time,
            Field::Category => &self.category,
        }
    }

    pub fn value(&self, dimension: Dimension) -> &str {
        self.get(dimension.field())
    }

    /// Values in export column order.
    pub fn values(&self) -> [&str; 6] {
        Field::ALL.map(|field| self.get(field))
    }

    /// A sheet row only counts as data when it names a garment or an operation.
    pub fn is_meaningful(&self) -> bool {
        !self.garment.is_empty() || !self.operation.is_empty()
    }
}
