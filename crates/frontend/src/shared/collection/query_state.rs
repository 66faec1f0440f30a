//! Состояние запроса списка: страница, размер страницы, поиск, сортировка, фильтры.
//!
//! Any committed change other than a page change sends the user back to page 1.
//! Search text is staged while typing and committed by an explicit submit.

use contracts::shared::list::{ListQuery, SortDirection};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// What a mutation means for the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryChange {
    /// Committed change, the list must be fetched again
    Refetch,
    /// Local-only change (typing into the search box)
    Staged,
    Unchanged,
}

impl QueryChange {
    pub fn needs_fetch(self) -> bool {
        self == QueryChange::Refetch
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    page: u32,
    page_size: u32,
    search_text: String,
    pending_search: String,
    sort: Option<SortSpec>,
    filters: BTreeMap<String, String>,
}

impl QueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search_text: String::new(),
            pending_search: String::new(),
            sort: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn with_sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Committed search text, the one sent to the service
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Text currently in the search box
    pub fn pending_search(&self) -> &str {
        &self.pending_search
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn filter(&self, key: &str) -> &str {
        self.filters.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set_page(&mut self, page: u32) -> QueryChange {
        let page = page.max(1);
        if page == self.page {
            return QueryChange::Unchanged;
        }
        self.page = page;
        QueryChange::Refetch
    }

    pub fn set_page_size(&mut self, page_size: u32) -> QueryChange {
        let page_size = page_size.max(1);
        let changed = page_size != self.page_size;
        self.page_size = page_size;
        self.commit(changed)
    }

    pub fn set_search_text(&mut self, text: &str) -> QueryChange {
        if self.pending_search == text {
            return QueryChange::Unchanged;
        }
        self.pending_search = text.to_string();
        QueryChange::Staged
    }

    /// Explicit submit: always fetches page 1, even with the same text
    pub fn submit_search(&mut self) -> QueryChange {
        self.search_text = self.pending_search.trim().to_string();
        self.page = 1;
        QueryChange::Refetch
    }

    pub fn set_sort(&mut self, field: &str, direction: SortDirection) -> QueryChange {
        let next = SortSpec {
            field: field.to_string(),
            direction,
        };
        let changed = self.sort.as_ref() != Some(&next);
        self.sort = Some(next);
        self.commit(changed)
    }

    /// Same column flips the direction, a new column starts ascending
    pub fn toggle_sort(&mut self, field: &str) -> QueryChange {
        let direction = match &self.sort {
            Some(current) if current.field == field => current.direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.set_sort(field, direction)
    }

    /// Empty value removes the filter
    pub fn set_filter(&mut self, key: &str, value: &str) -> QueryChange {
        let value = value.trim();
        let changed = if value.is_empty() {
            self.filters.remove(key).is_some()
        } else {
            self.filters.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        };
        self.commit(changed)
    }

    /// Clears search and filters, sort and page size stay
    pub fn reset(&mut self) -> QueryChange {
        let changed =
            !self.search_text.is_empty() || !self.filters.is_empty() || self.page != 1;
        self.search_text.clear();
        self.pending_search.clear();
        self.filters.clear();
        self.commit(changed)
    }

    fn commit(&mut self, changed: bool) -> QueryChange {
        if !changed && self.page == 1 {
            return QueryChange::Unchanged;
        }
        self.page = 1;
        QueryChange::Refetch
    }

    /// Search or any filter narrows the list
    pub fn has_active_criteria(&self) -> bool {
        !self.search_text.is_empty() || !self.filters.is_empty()
    }

    pub fn total_pages(&self, total_count: u64) -> u32 {
        let size = self.page_size as u64;
        (total_count.div_ceil(size)).max(1) as u32
    }

    pub fn to_list_query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            per_page: self.page_size,
            search: (!self.search_text.is_empty()).then(|| self.search_text.clone()),
            order_by: self.sort.as_ref().map(|s| s.field.clone()),
            order: self.sort.as_ref().map(|s| s.direction),
            filters: self.filters.clone(),
        }
    }
}
