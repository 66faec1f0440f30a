//! List query parameters and list response envelopes.
//!
//! The REST service is not consistent about the shape of list responses:
//! some endpoints return a bare array, some `{data: [...], meta: {...}}`,
//! and the paginated ones `{success, data: {data: [...], total, current_page, per_page, last_page}}`.
//! `ListResponse::decode` inspects the shape once, at the boundary, and the rest
//! of the console works with `ListResult`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Направление сортировки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Query parameters of a list endpoint.
///
/// `page` is 1-based. Entity-specific filters (`status`, `job_id`, ...) travel
/// as plain key/value pairs next to the standard parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortDirection>,
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Key/value pairs in the order they go on the wire (not yet url-encoded).
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("per_page".to_string(), self.per_page.to_string()),
        ];
        if let Some(search) = self.search.as_ref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search".to_string(), search.trim().to_string()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("order_by".to_string(), order_by.clone()));
            pairs.push((
                "order".to_string(),
                self.order.unwrap_or_default().as_str().to_string(),
            ));
        }
        for (key, value) in &self.filters {
            if !value.is_empty() {
                pairs.push((key.clone(), value.clone()));
            }
        }
        pairs
    }
}

/// Server pagination info, when the service provides it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: Option<u64>,
    pub current_page: Option<u32>,
    pub per_page: Option<u32>,
    pub last_page: Option<u32>,
}

impl PageMeta {
    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            total: read_u64(map.get("total")),
            current_page: read_u64(map.get("current_page")).map(|v| v as u32),
            per_page: read_u64(map.get("per_page")).map(|v| v as u32),
            last_page: read_u64(map.get("last_page")).map(|v| v as u32),
        }
    }
}

/// Numbers sometimes arrive as strings ("50"), accept both.
fn read_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decoded shape of a list response
#[derive(Debug, Clone, PartialEq)]
pub enum ListResponse<T> {
    /// Plain array without pagination info: the total is the array length.
    BareArray(Vec<T>),
    /// One page of a server-paginated collection.
    Paginated { items: Vec<T>, meta: PageMeta },
    /// `success: false` or an unrecognised payload.
    Failure,
}

impl<T: DeserializeOwned> ListResponse<T> {
    /// Inspect the raw body and decode items.
    ///
    /// Only item deserialization errors are reported; an unknown envelope
    /// shape is `Failure`, not an error.
    pub fn decode(body: Value) -> Result<Self, serde_json::Error> {
        if body.get("success").and_then(Value::as_bool) == Some(false) {
            return Ok(ListResponse::Failure);
        }

        let mut root = match body {
            Value::Array(items) => return Ok(ListResponse::BareArray(decode_items(items)?)),
            Value::Object(root) => root,
            _ => return Ok(ListResponse::Failure),
        };

        let sibling_meta = match root.get("meta") {
            Some(Value::Object(meta)) => Some(PageMeta::from_map(meta)),
            _ => None,
        };

        match root.remove("data") {
            Some(Value::Array(items)) => {
                let items = decode_items(items)?;
                match sibling_meta {
                    Some(meta) if meta.total.is_some() => Ok(ListResponse::Paginated { items, meta }),
                    _ => Ok(ListResponse::BareArray(items)),
                }
            }
            Some(Value::Object(mut page)) => match page.remove("data") {
                Some(Value::Array(items)) => {
                    let mut meta = PageMeta::from_map(&page);
                    let items = decode_items(items)?;
                    if meta.total.is_none() {
                        meta.total = Some(items.len() as u64);
                    }
                    Ok(ListResponse::Paginated { items, meta })
                }
                _ => Ok(ListResponse::Failure),
            },
            _ => Ok(ListResponse::Failure),
        }
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, serde_json::Error> {
    items.into_iter().map(serde_json::from_value).collect()
}

impl<T> ListResponse<T> {
    /// Normalize into one page of items plus the total across all pages.
    ///
    /// A bare array longer than the page size comes from an endpoint that does not
    /// paginate; it is paged on the client so the table never shows more than
    /// `page_size` rows.
    pub fn into_result(self, page: u32, page_size: u32) -> ListResult<T> {
        let page_size = page_size.max(1) as usize;
        match self {
            ListResponse::Failure => ListResult::empty(),
            ListResponse::BareArray(items) => {
                let total_count = items.len() as u64;
                let items = if items.len() > page_size {
                    let start = (page.max(1) as usize - 1) * page_size;
                    items.into_iter().skip(start).take(page_size).collect()
                } else {
                    items
                };
                ListResult { items, total_count }
            }
            ListResponse::Paginated { mut items, meta } => {
                items.truncate(page_size);
                let total_count = meta.total.unwrap_or(items.len() as u64);
                ListResult { items, total_count }
            }
        }
    }
}

/// One page of records plus the total count across all pages
#[derive(Debug, Clone, PartialEq)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total_count: u64,
}

impl<T> ListResult<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for ListResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Row {
        id: u32,
    }

    fn rows(n: u32) -> Value {
        Value::Array((1..=n).map(|id| json!({ "id": id })).collect())
    }

    #[test]
    fn test_paginated_uses_server_total() {
        let body = json!({
            "success": true,
            "data": { "data": rows(3), "total": 50, "current_page": 2, "per_page": 10, "last_page": 5 }
        });
        let decoded = ListResponse::<Row>::decode(body).unwrap();
        match &decoded {
            ListResponse::Paginated { items, meta } => {
                assert_eq!(items.len(), 3);
                assert_eq!(meta.current_page, Some(2));
                assert_eq!(meta.last_page, Some(5));
            }
            other => panic!("expected paginated, got {:?}", other),
        }
        let result = decoded.into_result(2, 10);
        assert_eq!(result.items, vec![Row { id: 1 }, Row { id: 2 }, Row { id: 3 }]);
        assert_eq!(result.total_count, 50);
    }

    #[test]
    fn test_bare_data_array_counts_items() {
        let body = json!({ "success": true, "data": rows(5) });
        let result = ListResponse::<Row>::decode(body).unwrap().into_result(1, 10);
        assert_eq!(result.items.len(), 5);
        assert_eq!(result.total_count, 5);
    }

    #[test]
    fn test_success_false_is_empty() {
        let decoded = ListResponse::<Row>::decode(json!({ "success": false })).unwrap();
        assert_eq!(decoded, ListResponse::Failure);
        let result = decoded.into_result(1, 10);
        assert!(result.is_empty());
        assert_eq!(result.total_count, 0);
    }

    #[test]
    fn test_success_false_wins_over_data() {
        let body = json!({ "success": false, "data": rows(2) });
        assert_eq!(ListResponse::<Row>::decode(body).unwrap(), ListResponse::Failure);
    }

    #[test]
    fn test_data_with_sibling_meta() {
        let body = json!({ "data": rows(2), "meta": { "total": "40", "per_page": 2 } });
        let result = ListResponse::<Row>::decode(body).unwrap().into_result(1, 2);
        assert_eq!(result.total_count, 40);
        assert_eq!(result.items.len(), 2);
    }

    #[test]
    fn test_top_level_array() {
        let result = ListResponse::<Row>::decode(rows(4)).unwrap().into_result(1, 25);
        assert_eq!(result.total_count, 4);
    }

    #[test]
    fn test_unknown_shapes_are_empty() {
        for body in [json!({ "data": "nope" }), json!({ "data": { "items": [] } }), json!(42), json!({})] {
            let result = ListResponse::<Row>::decode(body).unwrap().into_result(1, 10);
            assert!(result.is_empty());
            assert_eq!(result.total_count, 0);
        }
    }

    #[test]
    fn test_nested_without_total_falls_back_to_len() {
        let body = json!({ "data": { "data": rows(3) } });
        let result = ListResponse::<Row>::decode(body).unwrap().into_result(1, 10);
        assert_eq!(result.total_count, 3);
    }

    #[test]
    fn test_unpaginated_array_is_paged_locally() {
        let result = ListResponse::<Row>::decode(json!({ "data": rows(23) }))
            .unwrap()
            .into_result(3, 10);
        assert_eq!(result.total_count, 23);
        assert_eq!(result.items.first(), Some(&Row { id: 21 }));
        assert_eq!(result.items.len(), 3);
    }

    #[test]
    fn test_paginated_never_exceeds_page_size() {
        let body = json!({ "data": { "data": rows(12), "total": 12 } });
        let result = ListResponse::<Row>::decode(body).unwrap().into_result(1, 10);
        assert_eq!(result.items.len(), 10);
        assert_eq!(result.total_count, 12);
    }

    #[test]
    fn test_bad_item_is_decode_error() {
        let body = json!({ "data": [{ "id": "not-a-number" }] });
        assert!(ListResponse::<Row>::decode(body).is_err());
    }

    #[test]
    fn test_query_pairs() {
        let mut filters = BTreeMap::new();
        filters.insert("status".to_string(), "active".to_string());
        filters.insert("job_id".to_string(), String::new());
        let query = ListQuery {
            page: 2,
            per_page: 25,
            search: Some("  anna ".to_string()),
            order_by: Some("name".to_string()),
            order: Some(SortDirection::Desc),
            filters,
        };
        let pairs: Vec<String> = query.pairs().into_iter().map(|(k, v)| format!("{k}={v}")).collect();
        assert_eq!(
            pairs,
            vec!["page=2", "per_page=25", "search=anna", "order_by=name", "order=desc", "status=active"]
        );
    }
}
