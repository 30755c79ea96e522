//! Marker trait for transitions.

/// A request to move a state value forward.
///
/// Intents come from two places: the caller (add, edit, search, next page)
/// and collaborators reporting back (a loaded collection, a confirmed
/// write). Either way they are plain data handed to a [`Reducer`].
///
/// [`Reducer`]: super::Reducer
pub trait Intent: Send + 'static {}
