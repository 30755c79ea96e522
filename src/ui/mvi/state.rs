/// Marker trait for values owned by a reducer.
///
/// `PartialEq` lets callers detect "nothing changed" after a dispatch.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
