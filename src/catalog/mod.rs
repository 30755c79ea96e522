//! Book records and the collection reducer.

mod collection;
mod intent;
mod record;
mod reducer;

pub use collection::Collection;
pub use intent::CatalogIntent;
pub use record::{BookDraft, Record, RecordEdit, RecordId, ValidationError};
pub use reducer::CatalogReducer;
