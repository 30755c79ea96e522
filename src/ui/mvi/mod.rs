//! Model-View-Intent primitives shared by the catalogue and the view layer.
//!
//! ```text
//! CatalogIntent ──→ CatalogReducer ──→ Collection ──┐
//!                                                    ├──→ Projection
//! ViewIntent    ──→ ViewReducer    ──→ ViewState  ──┘
//! ```
//!
//! Every state change in the crate goes through a [`Reducer`]; nothing
//! mutates a [`UiState`] behind a reducer's back.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
