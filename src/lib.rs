//! A book catalogue: records kept in an ordered collection, changed only
//! through a reducer, searched and paged through pure projections, and
//! persisted to a local file or a remote HTTP service.

pub mod backend;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod storage;
pub mod store;
pub mod ui;
