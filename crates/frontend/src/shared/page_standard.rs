//! Page category constants for tab pages.
//!
//! Every page rendered inside a tab declares:
//!   - HTML `id` in the format `{entity}--{category}` (e.g. `"h102_meeting--list"`)
//!   - `data-page-category` with one of the constants below
//!
//! The `--` separator keeps the entity name searchable: copy the id from
//! the DOM inspector and it leads to `domain/h102_meeting/`.

/// List of records: table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Small reference list edited in place (statuses, dictionaries).
pub const PAGE_CAT_SETTINGS: &str = "settings";

/// All known category values.
pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_SETTINGS];

/// `{entity}--{category}`
pub fn page_id(entity: &str, category: &str) -> String {
    format!("{entity}--{category}")
}

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && is_known_category(category),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}
