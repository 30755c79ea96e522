//! State management for what the user sees: the MVI primitives and the
//! search/pagination view over the catalogue.

pub mod mvi;
pub mod view;
