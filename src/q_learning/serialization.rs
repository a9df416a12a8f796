//! Serialization envelope for trained value tables.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, q_learning::q_table::ValueTable};

/// Metadata about how a saved table was trained
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingMetadata {
    /// Number of training episodes
    pub episodes_trained: Option<usize>,
    /// Random seed used (if any)
    pub seed: Option<u64>,
    /// Rows of the lake map the table was trained on
    pub map: Option<Vec<String>>,
    /// Seconds since the Unix epoch when saved
    pub saved_at: Option<String>,
}

/// Versioned value table, as written by a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedValueTable {
    pub version: u32,
    pub table: ValueTable,
    pub metadata: TrainingMetadata,
}

impl SavedValueTable {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(table: ValueTable, metadata: TrainingMetadata) -> Self {
        Self {
            version: Self::VERSION,
            table,
            metadata,
        }
    }

    /// Unwrap the table after checking the format version.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedVersion`] for any other version.
    pub fn into_table(self) -> Result<ValueTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(self.table)
    }
}
