use crate::ui::mvi::UiState;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Ephemeral view parameters. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search: String,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl UiState for ViewState {}

impl Default for ViewState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size,
        }
    }
}
