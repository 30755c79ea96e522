use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewIntent {
    /// New search text. Jumps back to the first page.
    Search { text: String },
    /// Advance one page. `page_count` is that of the current filtered list.
    NextPage { page_count: usize },
    PrevPage,
    /// Jump to `page`, clamped to `1..=page_count` (page 1 when empty).
    GoTo { page: usize, page_count: usize },
    FirstPage,
}

impl Intent for ViewIntent {}
