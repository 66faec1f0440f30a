//! Table presenter: turns the current page of records into a render model.
//!
//! Pure function of (items, columns, loading, total, query). The Leptos view in
//! `ui::table` only draws what `present` returns.

use super::query_state::QueryState;
use contracts::shared::list::SortDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

impl Align {
    pub fn css_class(&self) -> &'static str {
        match self {
            Align::Left => "table__cell--left",
            Align::Right => "table__cell--right",
        }
    }
}

/// Column of a collection table
pub struct ColumnDef<R> {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub align: Align,
    pub render: fn(&R) -> String,
    /// Renders the cell as a badge with this css modifier
    pub badge: Option<fn(&R) -> &'static str>,
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ColumnDef<R> {}

impl<R> ColumnDef<R> {
    pub fn new(key: &'static str, label: &'static str, render: fn(&R) -> String) -> Self {
        Self {
            key,
            label,
            sortable: false,
            align: Align::Left,
            render,
            badge: None,
        }
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn badge(mut self, badge: fn(&R) -> &'static str) -> Self {
        self.badge = Some(badge);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderModel {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub align: Align,
    /// Set on the column the list is currently sorted by
    pub sorted: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellModel {
    pub text: String,
    pub align: Align,
    pub badge: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowModel<R> {
    pub id: String,
    pub record: R,
    pub cells: Vec<CellModel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerModel {
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub page_size: u32,
}

impl PagerModel {
    pub fn new(query: &QueryState, total_count: u64) -> Self {
        Self {
            page: query.page(),
            total_pages: query.total_pages(total_count),
            total_count,
            page_size: query.page_size(),
        }
    }

    /// "21–30 of 95"
    pub fn range_label(&self) -> String {
        if self.total_count == 0 {
            return "0 of 0".to_string();
        }
        let start = (self.page as u64 - 1) * self.page_size as u64 + 1;
        let end = (start + self.page_size as u64 - 1).min(self.total_count);
        format!("{}–{} of {}", start, end, self.total_count)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody<R> {
    Loading { skeleton_rows: usize },
    Empty { message: String },
    Rows(Vec<RowModel<R>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableModel<R> {
    pub headers: Vec<HeaderModel>,
    pub body: TableBody<R>,
    pub pager: PagerModel,
}

pub const MAX_SKELETON_ROWS: usize = 10;

pub fn empty_message(query: &QueryState, plural: &str) -> String {
    if query.has_active_criteria() {
        "No results match your search or filters".to_string()
    } else {
        format!("No {} yet", plural)
    }
}

pub fn present<R: Clone>(
    items: &[R],
    columns: &[ColumnDef<R>],
    record_id: fn(&R) -> String,
    loading: bool,
    total_count: u64,
    query: &QueryState,
    plural: &str,
) -> TableModel<R> {
    let headers = columns
        .iter()
        .map(|c| HeaderModel {
            key: c.key,
            label: c.label,
            sortable: c.sortable,
            align: c.align,
            sorted: query
                .sort()
                .filter(|s| c.sortable && s.field == c.key)
                .map(|s| s.direction),
        })
        .collect();

    let body = if loading {
        TableBody::Loading {
            skeleton_rows: (query.page_size() as usize).min(MAX_SKELETON_ROWS),
        }
    } else if items.is_empty() {
        TableBody::Empty {
            message: empty_message(query, plural),
        }
    } else {
        TableBody::Rows(
            items
                .iter()
                .map(|item| RowModel {
                    id: record_id(item),
                    record: item.clone(),
                    cells: columns
                        .iter()
                        .map(|c| CellModel {
                            text: (c.render)(item),
                            align: c.align,
                            badge: c.badge.map(|b| b(item)),
                        })
                        .collect(),
                })
                .collect(),
        )
    };

    TableModel {
        headers,
        body,
        pager: PagerModel::new(query, total_count),
    }
}
