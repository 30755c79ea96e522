use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::record::{Record, RecordId};
use crate::ui::mvi::Intent;

/// The four collection transitions.
///
/// Intents are plain data and round-trip through JSON as
/// `{"kind": "insert", "record": {...}}`. A `kind` this build does not know
/// decodes to [`CatalogIntent::Unrecognized`], which the reducer ignores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogIntent {
    /// Append a record. The caller guarantees the identifier is fresh.
    Insert { record: Record },
    /// Swap every record carrying `record.id`, keeping its position.
    Replace { record: Record },
    /// Drop every record carrying `id`.
    Remove { id: RecordId },
    /// Replace the whole collection (load / sync).
    Reset { records: Collection },
    #[serde(other)]
    Unrecognized,
}

impl Intent for CatalogIntent {}

impl CatalogIntent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Insert { .. } => "insert",
            Self::Replace { .. } => "replace",
            Self::Remove { .. } => "remove",
            Self::Reset { .. } => "reset",
            Self::Unrecognized => "unrecognized",
        }
    }
}
