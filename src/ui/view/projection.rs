use serde::{Deserialize, Serialize};

use crate::catalog::{Collection, Record};
use crate::ui::view::state::ViewState;

/// Which fields a search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Title only.
    #[default]
    Title,
    /// Title, author, and the decimal text of the year.
    AllFields,
}

/// What a view shows for one `(collection, view state)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub filtered: Vec<&'a Record>,
    pub page: Vec<&'a Record>,
    pub page_count: usize,
}

/// Records whose fields contain `search`, case-insensitively, in order.
///
/// Plain substring containment. An empty search matches everything.
pub fn filter<'a>(records: &'a [Record], search: &str, scope: SearchScope) -> Vec<&'a Record> {
    if search.is_empty() {
        return records.iter().collect();
    }
    let needle = search.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle, scope))
        .collect()
}

fn matches(record: &Record, needle: &str, scope: SearchScope) -> bool {
    if record.title.to_lowercase().contains(needle) {
        return true;
    }
    match scope {
        SearchScope::Title => false,
        SearchScope::AllFields => {
            record.author.to_lowercase().contains(needle)
                || record.year.to_string().contains(needle)
        }
    }
}

/// The half-open range `[(page-1)*size, page*size)`, cut to what exists.
///
/// Out-of-range pages come back empty; page 0 and size 0 do too.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// `ceil(len / page_size)`; 0 for an empty list or a zero page size.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

pub fn project<'a>(collection: &'a Collection, view: &ViewState, scope: SearchScope) -> Projection<'a> {
    let filtered = filter(collection.records(), &view.search, scope);
    let page = page_slice(&filtered, view.page, view.page_size).to_vec();
    let page_count = page_count(filtered.len(), view.page_size);
    Projection {
        filtered,
        page,
        page_count,
    }
}
