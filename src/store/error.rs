use thiserror::Error;

use crate::backend::BackendError;
use crate::catalog::ValidationError;

/// Why a store operation left the collection untouched.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid book: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend '{backend}' failed: {source}")]
    Backend {
        backend: &'static str,
        #[source]
        source: BackendError,
    },
}
