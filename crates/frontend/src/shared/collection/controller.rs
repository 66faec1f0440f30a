//! Composition of query state, fetcher, form and row actions for one page.
//!
//! The controller does not know about Leptos: state lives behind a
//! `StateHandle`, which is a `RwSignal` in the browser and an
//! `Rc<RefCell<_>>` in tests. Borrows of the state are never held across an
//! `.await`.

use super::actions::{ActionDispatcher, ActionOutcome, SelectionContext};
use super::api::CollectionApi;
use super::entity::{CollectionEntity, TransitionDef};
use super::fetcher::{FetchOutcome, Fetcher};
use super::form::{FormController, SubmitError};
use super::notify::{Confirmer, Notifier};
use super::query_state::{QueryChange, QueryState};
use contracts::shared::list::ListResult;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

/// Shared mutable cell holding the page state
pub trait StateHandle<S> {
    /// `None` when the state is gone (page unmounted)
    fn update_state<T>(&self, f: impl FnOnce(&mut S) -> T) -> Option<T>;
}

impl<S> StateHandle<S> for Rc<RefCell<S>> {
    fn update_state<T>(&self, f: impl FnOnce(&mut S) -> T) -> Option<T> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Everything one collection page shows
pub struct CollectionState<E: CollectionEntity> {
    pub query: QueryState,
    pub result: ListResult<E::Record>,
    /// A fetch is in flight
    pub loading: bool,
    /// At least one fetch has been applied
    pub loaded: bool,
    pub selection: SelectionContext<E::Record>,
    pub form: Option<FormController<E>>,
}

impl<E: CollectionEntity> CollectionState<E> {
    pub fn new(page_size: u32) -> Self {
        let mut query = QueryState::new(page_size);
        if let Some((field, direction)) = E::default_sort() {
            query = query.with_sort(field, direction);
        }
        Self {
            query,
            result: ListResult::empty(),
            loading: false,
            loaded: false,
            selection: SelectionContext::Idle,
            form: None,
        }
    }

    /// Skeleton rows until the first result arrives and while a fetch runs
    pub fn shows_skeleton(&self) -> bool {
        self.loading || !self.loaded
    }

    fn is_saving(&self) -> bool {
        self.form.as_ref().is_some_and(FormController::is_saving)
    }
}

pub struct CollectionController<E: CollectionEntity, A, H, N, C> {
    api: A,
    state: H,
    notifier: N,
    confirmer: C,
    fetcher: Fetcher,
    _entity: PhantomData<fn() -> E>,
}

impl<E, A, H, N, C> Clone for CollectionController<E, A, H, N, C>
where
    E: CollectionEntity,
    A: Clone,
    H: Clone,
    N: Clone,
    C: Clone,
{
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            state: self.state.clone(),
            notifier: self.notifier.clone(),
            confirmer: self.confirmer.clone(),
            fetcher: self.fetcher.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E, A, H, N, C> CollectionController<E, A, H, N, C>
where
    E: CollectionEntity,
    A: CollectionApi<E::Record>,
    H: StateHandle<CollectionState<E>>,
    N: Notifier,
    C: Confirmer,
{
    pub fn new(api: A, state: H, notifier: N, confirmer: C) -> Self {
        Self {
            api,
            state,
            notifier,
            confirmer,
            fetcher: Fetcher::new(E::PLURAL),
            _entity: PhantomData,
        }
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    /// Fetch the current query. If the page is past the end (after a delete
    /// emptied it) the query moves to the last page and fetches again.
    pub async fn refresh(&self) {
        loop {
            let Some(query) = self.state.update_state(|s| {
                s.loading = true;
                s.query.clone()
            }) else {
                return;
            };

            let result = match self.fetcher.fetch(&self.api, &query, &self.notifier).await {
                FetchOutcome::Stale => return,
                FetchOutcome::Applied(result) => result,
            };

            let again = self.state.update_state(|s| {
                let last_page = s.query.total_pages(result.total_count);
                if result.is_empty() && result.total_count > 0 && s.query.page() > last_page {
                    log::debug!("{} page {} is past the end, going to {}", E::PLURAL, s.query.page(), last_page);
                    s.query.set_page(last_page).needs_fetch()
                } else {
                    s.result = result;
                    s.loading = false;
                    s.loaded = true;
                    false
                }
            });
            if again != Some(true) {
                return;
            }
        }
    }

    async fn apply(&self, change: Option<QueryChange>) {
        if change.is_some_and(QueryChange::needs_fetch) {
            self.refresh().await;
        }
    }

    pub async fn set_page(&self, page: u32) {
        let change = self.state.update_state(|s| s.query.set_page(page));
        self.apply(change).await;
    }

    pub async fn set_page_size(&self, page_size: u32) {
        let change = self.state.update_state(|s| s.query.set_page_size(page_size));
        self.apply(change).await;
    }

    /// Typing only; nothing is fetched until `submit_search`
    pub fn set_search_text(&self, text: &str) {
        self.state.update_state(|s| s.query.set_search_text(text));
    }

    pub async fn submit_search(&self) {
        let change = self.state.update_state(|s| s.query.submit_search());
        self.apply(change).await;
    }

    pub async fn toggle_sort(&self, field: &str) {
        let change = self.state.update_state(|s| s.query.toggle_sort(field));
        self.apply(change).await;
    }

    pub async fn set_filter(&self, key: &str, value: &str) {
        let change = self.state.update_state(|s| s.query.set_filter(key, value));
        self.apply(change).await;
    }

    pub async fn reset_filters(&self) {
        let change = self.state.update_state(|s| s.query.reset());
        self.apply(change).await;
    }

    pub fn open_create(&self) {
        self.state.update_state(|s| {
            if s.is_saving() {
                return;
            }
            s.selection = SelectionContext::Idle;
            s.form = Some(FormController::open_create());
        });
    }

    pub fn open_edit(&self, record: &E::Record) {
        self.state.update_state(|s| {
            if s.is_saving() {
                return;
            }
            s.selection = SelectionContext::Editing(record.clone());
            s.form = Some(FormController::open_edit(record));
        });
    }

    pub fn view(&self, record: &E::Record) {
        self.state.update_state(|s| {
            if s.is_saving() {
                return;
            }
            s.form = None;
            s.selection = SelectionContext::Viewing(record.clone());
        });
    }

    /// Cancel, backdrop or Escape: the draft is discarded
    pub fn close_dialog(&self) {
        self.state.update_state(|s| {
            if s.is_saving() {
                return;
            }
            s.form = None;
            s.selection = SelectionContext::Idle;
        });
    }

    pub fn set_field(&self, name: &str, value: impl Into<String>) {
        self.state.update_state(|s| {
            if let Some(form) = s.form.as_mut() {
                form.set_field(name, value);
            }
        });
    }

    pub async fn submit_form(&self) -> Result<E::Record, SubmitError> {
        let prepared = self
            .state
            .update_state(|s| s.form.as_mut().map(FormController::prepare_submit))
            .flatten()
            .ok_or_else(|| SubmitError::Failed("No form is open".to_string()))?;
        let request = prepared?;

        let result = FormController::<E>::send(&self.api, &request).await;

        let outcome = self
            .state
            .update_state(|s| {
                let form = s.form.as_mut()?;
                let outcome = form.apply(result, &self.notifier);
                let close = match &outcome {
                    Ok(_) => true,
                    Err(err) => err.closes_dialog(),
                };
                if close {
                    s.form = None;
                    s.selection = SelectionContext::Idle;
                }
                Some(outcome)
            })
            .flatten()
            .ok_or_else(|| SubmitError::Failed("Form was closed".to_string()))?;

        if outcome.is_ok() {
            self.refresh().await;
        }
        outcome
    }

    fn dispatcher(&self) -> ActionDispatcher<'_, E, A, N, C> {
        ActionDispatcher::new(&self.api, &self.notifier, &self.confirmer)
    }

    /// Not offered while a form is being saved
    pub async fn delete(&self, record: &E::Record) -> ActionOutcome {
        let started = self.state.update_state(|s| {
            if s.is_saving() {
                return false;
            }
            s.form = None;
            s.selection = SelectionContext::Deleting(record.clone());
            true
        });
        if started != Some(true) {
            return ActionOutcome::Cancelled;
        }
        let outcome = self.dispatcher().delete(record, || self.refresh()).await;
        self.state
            .update_state(|s| s.selection = SelectionContext::Idle);
        outcome
    }

    pub async fn transition(&self, record: &E::Record, def: &TransitionDef) -> ActionOutcome {
        self.dispatcher()
            .transition(record, def, || self.refresh())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::api::ApiError;
    use crate::shared::collection::testing::{
        row, Call, MockApi, RecordingNotifier, Row, ScriptedConfirmer, TestEntity, ACTIVATE,
    };
    use contracts::shared::list::{ListResponse, PageMeta};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    type State = Rc<RefCell<CollectionState<TestEntity>>>;
    type Controller =
        CollectionController<TestEntity, MockApi, State, RecordingNotifier, ScriptedConfirmer>;

    fn controller(api: &MockApi, confirm: bool) -> (Controller, RecordingNotifier) {
        let notifier = RecordingNotifier::default();
        let state = Rc::new(RefCell::new(CollectionState::new(10)));
        let controller = Controller::new(
            api.clone(),
            state,
            notifier.clone(),
            ScriptedConfirmer::answering(confirm),
        );
        (controller, notifier)
    }

    fn page(items: Vec<Row>, total: u64) -> Result<ListResponse<Row>, ApiError> {
        Ok(ListResponse::Paginated {
            items,
            meta: PageMeta {
                total: Some(total),
                ..PageMeta::default()
            },
        })
    }

    #[test]
    fn test_refresh_applies_result() {
        let api = MockApi::new();
        api.push_list(page(vec![row(1, "A"), row(2, "B")], 12));
        let (ctl, _) = controller(&api, true);

        block_on(ctl.refresh());
        let state = ctl.state().borrow();
        assert_eq!(state.result.items.len(), 2);
        assert_eq!(state.result.total_count, 12);
        assert!(state.loaded);
        assert!(!state.loading);
        assert_eq!(api.list_queries()[0].order_by.as_deref(), Some("name"));
    }

    #[test]
    fn test_rapid_filter_changes_apply_last_issued() {
        let api = MockApi::new();
        let gate_a = api.gate_next_list();
        let gate_b = api.gate_next_list();
        let (ctl, notifier) = controller(&api, true);

        let mut pool = LocalPool::new();
        for status in ["draft", "active"] {
            let ctl = ctl.clone();
            pool.spawner()
                .spawn_local(async move { ctl.set_filter("status", status).await })
                .unwrap();
            pool.run_until_stalled();
        }

        gate_b.send(page(vec![row(2, "Active one")], 1)).unwrap();
        pool.run_until_stalled();
        gate_a.send(page(vec![row(1, "Draft one")], 1)).unwrap();
        pool.run();

        let state = ctl.state().borrow();
        assert_eq!(state.result.items, vec![row(2, "Active one")]);
        assert_eq!(state.query.filter("status"), "active");
        assert!(!state.loading);
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_typing_search_makes_no_calls() {
        let api = MockApi::new();
        let (ctl, _) = controller(&api, true);
        for text in ["a", "an", "ann"] {
            ctl.set_search_text(text);
        }
        assert!(api.calls().is_empty());

        block_on(ctl.submit_search());
        let queries = api.list_queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].search.as_deref(), Some("ann"));
    }

    #[test]
    fn test_delete_then_exactly_one_refresh() {
        let api = MockApi::new();
        let (ctl, notifier) = controller(&api, true);

        let outcome = block_on(ctl.delete(&row(9, "Nine")));
        assert_eq!(outcome, ActionOutcome::Completed);
        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Delete("9".into()));
        assert!(matches!(calls[1], Call::List(_)));
        assert_eq!(notifier.notices().len(), 1);
        assert!(ctl.state().borrow().selection.is_idle());
    }

    #[test]
    fn test_declined_delete_does_nothing() {
        let api = MockApi::new();
        let (ctl, notifier) = controller(&api, false);
        assert_eq!(block_on(ctl.delete(&row(9, "Nine"))), ActionOutcome::Cancelled);
        assert!(api.calls().is_empty());
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_emptied_last_page_steps_back() {
        let api = MockApi::new();
        api.push_list(page(vec![row(21, "U")], 21));
        let (ctl, _) = controller(&api, true);
        block_on(ctl.set_page(3));

        // the only record on page 3 is deleted
        api.push_list(page(vec![], 20));
        api.push_list(page((11..=20).map(|i| row(i, "R")).collect(), 20));
        block_on(ctl.delete(&row(21, "U")));

        let pages: Vec<u32> = api.list_queries().iter().map(|q| q.page).collect();
        assert_eq!(pages, vec![3, 3, 2]);
        let state = ctl.state().borrow();
        assert_eq!(state.query.page(), 2);
        assert_eq!(state.result.items.len(), 10);
    }

    #[test]
    fn test_submit_success_closes_and_refreshes() {
        let api = MockApi::new();
        let (ctl, notifier) = controller(&api, true);
        ctl.open_create();
        ctl.set_field("name", "Fresh");

        let saved = block_on(ctl.submit_form()).unwrap();
        assert_eq!(saved.name, "Fresh");
        assert!(ctl.state().borrow().form.is_none());
        let calls = api.calls();
        assert!(matches!(calls[0], Call::Create(_)));
        assert!(matches!(calls[1], Call::List(_)));
        assert_eq!(notifier.notices()[0].message, "Row created successfully");
    }

    #[test]
    fn test_remote_field_errors_keep_dialog_open() {
        let api = MockApi::new();
        api.push_write(Err(ApiError::Validation {
            errors: [("name", "Title is required")].into_iter().collect(),
            message: Some("Invalid data".into()),
        }));
        let (ctl, notifier) = controller(&api, true);
        ctl.open_edit(&row(5, "Five"));

        let err = block_on(ctl.submit_form()).unwrap_err();
        assert!(matches!(err, SubmitError::Rejected(_)));
        let state = ctl.state().borrow();
        let form = state.form.as_ref().unwrap();
        assert_eq!(form.errors().get("name"), Some("Title is required"));
        assert!(notifier.notices().is_empty());
        // no refresh after a rejected save
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn test_invalid_submit_makes_no_call() {
        let api = MockApi::new();
        let (ctl, _) = controller(&api, true);
        ctl.open_create();
        let err = block_on(ctl.submit_form()).unwrap_err();
        assert!(matches!(err, SubmitError::Invalid(_)));
        assert!(api.calls().is_empty());
        assert!(ctl.state().borrow().form.is_some());
    }

    #[test]
    fn test_dialogs_do_not_share_drafts() {
        let api = MockApi::new();
        let (ctl, _) = controller(&api, true);
        ctl.open_create();
        ctl.set_field("name", "unsaved");
        ctl.close_dialog();
        ctl.open_edit(&row(3, "Three"));
        assert_eq!(
            ctl.state().borrow().form.as_ref().map(|f| f.draft().get("name").to_string()),
            Some("Three".to_string())
        );
        ctl.open_create();
        assert_eq!(
            ctl.state().borrow().form.as_ref().map(|f| f.draft().get("name").to_string()),
            Some(String::new())
        );
    }

    #[test]
    fn test_saving_form_is_not_replaced() {
        let api = MockApi::new();
        let (ctl, _) = controller(&api, true);
        ctl.open_create();
        ctl.set_field("name", "Pending");
        assert!(ctl.state().borrow_mut().form.as_mut().unwrap().prepare_submit().is_ok());

        ctl.open_edit(&row(3, "Three"));
        ctl.view(&row(3, "Three"));
        ctl.open_create();
        ctl.close_dialog();
        assert_eq!(block_on(ctl.delete(&row(3, "Three"))), ActionOutcome::Cancelled);

        let state = ctl.state().borrow();
        let form = state.form.as_ref().unwrap();
        assert!(form.is_saving());
        assert_eq!(form.draft().get("name"), "Pending");
        assert!(state.selection.is_idle());
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_skeleton_until_first_result() {
        let api = MockApi::new();
        api.push_list(page(vec![], 0));
        let (ctl, _) = controller(&api, true);
        assert!(ctl.state().borrow().shows_skeleton());

        block_on(ctl.refresh());
        assert!(!ctl.state().borrow().shows_skeleton());
    }

    #[test]
    fn test_view_replaces_selection() {
        let api = MockApi::new();
        let (ctl, _) = controller(&api, true);
        ctl.open_edit(&row(1, "One"));
        ctl.view(&row(2, "Two"));
        let state = ctl.state().borrow();
        assert!(state.form.is_none());
        assert_eq!(state.selection.viewing().map(|r| r.id), Some(2));
    }

    #[test]
    fn test_transition_refreshes() {
        let api = MockApi::new();
        let (ctl, _) = controller(&api, true);
        assert_eq!(block_on(ctl.transition(&row(4, "Four"), &ACTIVATE)), ActionOutcome::Completed);
        let calls = api.calls();
        assert_eq!(calls[0], Call::Action("4".into(), "activate".into()));
        assert!(matches!(calls[1], Call::List(_)));
    }

    #[test]
    fn test_failed_load_shows_empty_state() {
        let api = MockApi::new();
        api.push_list(page(vec![row(1, "A")], 1));
        let (ctl, notifier) = controller(&api, true);
        block_on(ctl.refresh());
        api.push_list(Err(ApiError::Network("offline".into())));
        block_on(ctl.refresh());

        let state = ctl.state().borrow();
        assert!(state.result.is_empty());
        assert_eq!(notifier.notices()[0].message, "Could not load rows");
    }
}
