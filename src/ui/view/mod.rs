//! Derived, read-only views over a [`Collection`](crate::catalog::Collection):
//! search filtering, pagination, and the view-state reducer that drives them.

mod intent;
mod projection;
mod reducer;
mod state;

pub use intent::ViewIntent;
pub use projection::{filter, page_count, page_slice, project, Projection, SearchScope};
pub use reducer::ViewReducer;
pub use state::{ViewState, DEFAULT_PAGE_SIZE};
