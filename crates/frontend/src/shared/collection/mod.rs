//! Remote Collection View: one generic list/filter/paginate/edit page
//! parameterised by a `CollectionEntity`.
//!
//! Dependency order (leaves first):
//! `api` → `query_state` → `fetcher` → `table` → `form` → `actions` → `controller` → `ui`

pub mod actions;
pub mod api;
pub mod controller;
pub mod entity;
pub mod fetcher;
pub mod form;
pub mod notify;
pub mod query_state;
pub mod table;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

/// "appraisal cycle" → "Appraisal cycle"
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
