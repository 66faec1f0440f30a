//! In-memory doubles for the collection seams.

use super::api::{ApiError, CollectionApi, EndpointSet};
use super::entity::{CollectionEntity, FilterDef, TransitionDef};
use super::form::{FieldKind, FormField};
use super::notify::{Confirmer, Notice, Notifier};
use super::table::ColumnDef;
use async_trait::async_trait;
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::{ListQuery, ListResponse, SortDirection};
use contracts::shared::validation::Rule;
use futures::channel::oneshot;
use serde::Deserialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Row {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub starts_on: Option<String>,
    #[serde(default)]
    pub ends_on: Option<String>,
}

pub fn row(id: u32, name: &str) -> Row {
    Row {
        id,
        name: name.to_string(),
        status: "draft".to_string(),
        budget: None,
        starts_on: None,
        ends_on: None,
    }
}

pub const ACTIVATE: TransitionDef = TransitionDef {
    action: "activate",
    label: "Activate",
    confirm_title: "Activate row",
    confirm_message: "Activate this row?",
    success_message: "Row activated",
    failure_message: "Could not activate row",
    applies_to: TransitionDef::always,
};

const OWNERS: &[(&str, &str)] = &[("1", "Ann"), ("2", "Bob")];

pub struct TestEntity;

impl CollectionEntity for TestEntity {
    type Record = Row;

    const PAGE_ID: &'static str = "test_rows";
    const TITLE: &'static str = "Rows";
    const SINGULAR: &'static str = "row";
    const PLURAL: &'static str = "rows";
    const ENDPOINTS: EndpointSet = EndpointSet::new("/api/rows");

    fn record_id(record: &Row) -> String {
        record.id.to_string()
    }

    fn record_label(record: &Row) -> String {
        record.name.clone()
    }

    fn record_status(record: &Row) -> String {
        record.status.clone()
    }

    fn columns() -> Vec<ColumnDef<Row>> {
        vec![
            ColumnDef::new("name", "Name", |r: &Row| r.name.clone()).sortable(),
            ColumnDef::new("status", "Status", |r: &Row| r.status.clone()).badge(|_| "subtle"),
        ]
    }

    fn filters() -> Vec<FilterDef> {
        vec![FilterDef::select(
            "status",
            "Status",
            vec![("draft", "Draft"), ("active", "Active")],
        )]
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("name", SortDirection::Asc))
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("starts_on", "Starts on", FieldKind::Date),
            FormField::new("ends_on", "Ends on", FieldKind::Date),
            FormField::new("budget", "Budget", FieldKind::Number),
            FormField::new("owner_id", "Owner", FieldKind::Select(OWNERS)).create_only(),
        ]
    }

    fn form_defaults() -> DraftRecord {
        DraftRecord::from_pairs([("budget", "0")])
    }

    fn project(record: &Row) -> DraftRecord {
        DraftRecord::from_pairs([
            ("name", record.name.clone()),
            ("budget", record.budget.map(|b| b.to_string()).unwrap_or_default()),
            ("starts_on", record.starts_on.clone().unwrap_or_default()),
            ("ends_on", record.ends_on.clone().unwrap_or_default()),
        ])
    }

    fn rules(_mode: FormMode) -> Vec<Rule> {
        vec![
            Rule::required("name", "Name"),
            Rule::max_length("name", "Name", 50),
            Rule::DateNotBefore {
                start: "starts_on",
                end: "ends_on",
            },
            Rule::NumberRange {
                field: "budget",
                label: "Budget",
                min: 0.0,
                max: 10_000.0,
            },
        ]
    }

    fn transitions() -> Vec<TransitionDef> {
        vec![ACTIVATE]
    }

    fn detail_rows(record: &Row) -> Vec<(&'static str, String)> {
        vec![("Name", record.name.clone())]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List(ListQuery),
    Create(Value),
    Update(String, Value),
    Delete(String),
    Action(String, String),
}

pub type ListReply = Result<ListResponse<Row>, ApiError>;

enum Scripted {
    Ready(ListReply),
    /// Resolves when the test sends through the paired sender
    Gated(oneshot::Receiver<ListReply>),
}

#[derive(Default)]
struct MockState {
    calls: Vec<Call>,
    lists: VecDeque<Scripted>,
    writes: VecDeque<Result<Row, ApiError>>,
    units: VecDeque<Result<(), ApiError>>,
}

/// Records every call; replies are scripted, otherwise succeed with empty data
#[derive(Clone, Default)]
pub struct MockApi {
    inner: Rc<RefCell<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, reply: ListReply) {
        self.inner.borrow_mut().lists.push_back(Scripted::Ready(reply));
    }

    pub fn push_list_body(&self, body: Value) {
        self.push_list(ListResponse::decode(body).map_err(|e| ApiError::Decode(e.to_string())));
    }

    pub fn gate_next_list(&self) -> oneshot::Sender<ListReply> {
        let (tx, rx) = oneshot::channel();
        self.inner.borrow_mut().lists.push_back(Scripted::Gated(rx));
        tx
    }

    pub fn push_write(&self, reply: Result<Row, ApiError>) {
        self.inner.borrow_mut().writes.push_back(reply);
    }

    /// Reply for the next delete or action call
    pub fn push_unit(&self, reply: Result<(), ApiError>) {
        self.inner.borrow_mut().units.push_back(reply);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.borrow().calls.clone()
    }

    pub fn list_queries(&self) -> Vec<ListQuery> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::List(q) => Some(q),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.inner.borrow_mut().calls.push(call);
    }

    fn next_write(&self, id: u32, payload: &Value) -> Result<Row, ApiError> {
        self.inner.borrow_mut().writes.pop_front().unwrap_or_else(|| {
            Ok(row(id, payload.get("name").and_then(Value::as_str).unwrap_or_default()))
        })
    }

    fn next_unit(&self) -> Result<(), ApiError> {
        self.inner.borrow_mut().units.pop_front().unwrap_or(Ok(()))
    }
}

#[async_trait(?Send)]
impl CollectionApi<Row> for MockApi {
    async fn list(&self, query: &ListQuery) -> Result<ListResponse<Row>, ApiError> {
        self.record(Call::List(query.clone()));
        let next = self.inner.borrow_mut().lists.pop_front();
        match next {
            None => Ok(ListResponse::BareArray(Vec::new())),
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(ApiError::Network("gate dropped".into()))),
        }
    }

    async fn create(&self, payload: &Value) -> Result<Row, ApiError> {
        self.record(Call::Create(payload.clone()));
        self.next_write(100, payload)
    }

    async fn update(&self, id: &str, payload: &Value) -> Result<Row, ApiError> {
        self.record(Call::Update(id.to_string(), payload.clone()));
        self.next_write(id.parse().unwrap_or_default(), payload)
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.record(Call::Delete(id.to_string()));
        self.next_unit()
    }

    async fn action(&self, id: &str, action: &str) -> Result<(), ApiError> {
        self.record(Call::Action(id.to_string(), action.to_string()));
        self.next_unit()
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// Always gives the same answer and remembers what it was asked
#[derive(Clone)]
pub struct ScriptedConfirmer {
    answer: bool,
    asked: Rc<RefCell<Vec<(String, String)>>>,
}

impl ScriptedConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Rc::default(),
        }
    }

    pub fn asked(&self) -> Vec<(String, String)> {
        self.asked.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        self.asked
            .borrow_mut()
            .push((title.to_string(), message.to_string()));
        self.answer
    }
}
