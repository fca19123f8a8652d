use serde::{Deserialize, Serialize};

use crate::engine::errors::ValueError;
use crate::engine::types::Value;

/// Range and cardinality summary of a page or a column. Bounds are stored as
/// marshalled [`Value`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub min_value: Option<Vec<u8>>,
    pub max_value: Option<Vec<u8>>,
    /// Zero when cardinality tracking is off.
    pub cardinality_count: u64,
}

impl Statistics {
    pub fn min(&self) -> Result<Option<Value>, ValueError> {
        self.min_value.as_deref().map(Value::unmarshal_binary).transpose()
    }

    pub fn max(&self) -> Result<Option<Value>, ValueError> {
        self.max_value.as_deref().map(Value::unmarshal_binary).transpose()
    }
}
