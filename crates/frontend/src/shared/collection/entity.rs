//! Per-entity description that parameterises the collection page.

use super::api::EndpointSet;
use super::form::FormField;
use super::table::ColumnDef;
use crate::shared::page_standard::PAGE_CAT_LIST;
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::SortDirection;
use contracts::shared::validation::Rule;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// Filter control in the filter panel; no options means a free-text input
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDef {
    pub key: &'static str,
    pub label: &'static str,
    pub options: Vec<(&'static str, &'static str)>,
}

impl FilterDef {
    pub fn select(
        key: &'static str,
        label: &'static str,
        options: Vec<(&'static str, &'static str)>,
    ) -> Self {
        Self { key, label, options }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            options: Vec::new(),
        }
    }
}

/// Status transition offered as a row action (`POST {item}/{action}`)
#[derive(Debug, Clone, Copy)]
pub struct TransitionDef {
    pub action: &'static str,
    pub label: &'static str,
    pub confirm_title: &'static str,
    pub confirm_message: &'static str,
    pub success_message: &'static str,
    pub failure_message: &'static str,
    /// Offered only for records this returns true for
    pub applies_to: fn(&str) -> bool,
}

impl TransitionDef {
    pub fn always(_status: &str) -> bool {
        true
    }
}

pub trait CollectionEntity: 'static {
    type Record: Clone + Debug + PartialEq + DeserializeOwned + Send + Sync + 'static;

    /// Tab key, also the `?active=` value
    const PAGE_ID: &'static str;
    const TITLE: &'static str;
    /// Lowercase nouns used in messages ("meeting", "meetings")
    const SINGULAR: &'static str;
    const PLURAL: &'static str;
    const ENDPOINTS: EndpointSet;
    /// `data-page-category` of the page
    const PAGE_CATEGORY: &'static str = PAGE_CAT_LIST;

    fn record_id(record: &Self::Record) -> String;

    /// Short human label used in confirmation texts
    fn record_label(record: &Self::Record) -> String;

    /// Status used to decide which transitions apply
    fn record_status(_record: &Self::Record) -> String {
        String::new()
    }

    fn columns() -> Vec<ColumnDef<Self::Record>>;

    fn filters() -> Vec<FilterDef> {
        Vec::new()
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        None
    }

    fn form_fields() -> Vec<FormField>;

    fn form_defaults() -> DraftRecord;

    /// Record → draft for edit mode
    fn project(record: &Self::Record) -> DraftRecord;

    fn rules(mode: FormMode) -> Vec<Rule>;

    fn transitions() -> Vec<TransitionDef> {
        Vec::new()
    }

    /// Label/value pairs of the view dialog
    fn detail_rows(record: &Self::Record) -> Vec<(&'static str, String)>;
}
