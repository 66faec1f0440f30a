//! List loading with a last-request-wins guard.

use super::api::CollectionApi;
use super::notify::{Notice, Notifier};
use super::query_state::QueryState;
use contracts::shared::list::ListResult;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Number handed out for one list request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Monotonic counter; only the most recently issued ticket may apply its result
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer(Arc<AtomicU64>);

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<R> {
    Applied(ListResult<R>),
    /// A newer request was issued while this one was in flight
    Stale,
}

#[derive(Debug, Clone)]
pub struct Fetcher {
    sequencer: RequestSequencer,
    plural: &'static str,
}

impl Fetcher {
    pub fn new(plural: &'static str) -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            plural,
        }
    }

    pub async fn fetch<R, A, N>(&self, api: &A, query: &QueryState, notifier: &N) -> FetchOutcome<R>
    where
        A: CollectionApi<R> + ?Sized,
        N: Notifier + ?Sized,
    {
        let ticket = self.sequencer.issue();
        let list_query = query.to_list_query();
        log::debug!(
            "fetch {} #{} page={} per_page={}",
            self.plural,
            ticket.0,
            list_query.page,
            list_query.per_page
        );

        let response = api.list(&list_query).await;

        if !self.sequencer.is_latest(ticket) {
            log::warn!("fetch {} #{} superseded, result dropped", self.plural, ticket.0);
            return FetchOutcome::Stale;
        }

        match response {
            Ok(response) => {
                FetchOutcome::Applied(response.into_result(query.page(), query.page_size()))
            }
            Err(err) => {
                log::error!("fetch {} failed: {}", self.plural, err);
                let fallback = format!("Could not load {}", self.plural);
                notifier.notify(Notice::error("Error", err.user_message(&fallback)));
                FetchOutcome::Applied(ListResult::empty())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::api::ApiError;
    use crate::shared::collection::notify::NoticeLevel;
    use crate::shared::collection::testing::{row, MockApi, RecordingNotifier, Row};
    use contracts::shared::list::ListResponse;
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_sequencer_latest_only() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        assert!(seq.is_latest(first));
        let second = seq.issue();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
        assert!(second > first);
    }

    #[test]
    fn test_older_response_resolving_last_is_dropped() {
        let api = MockApi::new();
        let notifier = RecordingNotifier::default();
        let fetcher = Fetcher::new("rows");
        let gate_a = api.gate_next_list();
        let gate_b = api.gate_next_list();

        let mut pool = LocalPool::new();
        let outcomes: Rc<RefCell<Vec<(&str, FetchOutcome<Row>)>>> = Rc::default();

        for (name, query) in [("a", QueryState::new(10)), ("b", QueryState::new(20))] {
            let (api, notifier, fetcher, outcomes) =
                (api.clone(), notifier.clone(), fetcher.clone(), outcomes.clone());
            pool.spawner()
                .spawn_local(async move {
                    let outcome = fetcher.fetch(&api, &query, &notifier).await;
                    outcomes.borrow_mut().push((name, outcome));
                })
                .unwrap();
            pool.run_until_stalled();
        }

        // B resolves first, then A
        gate_b.send(Ok(ListResponse::BareArray(vec![row(2, "B")]))).unwrap();
        pool.run_until_stalled();
        gate_a.send(Ok(ListResponse::BareArray(vec![row(1, "A")]))).unwrap();
        pool.run();

        let outcomes = outcomes.borrow();
        assert_eq!(outcomes[0].0, "b");
        assert_eq!(
            outcomes[0].1,
            FetchOutcome::Applied(ListResult {
                items: vec![row(2, "B")],
                total_count: 1
            })
        );
        assert_eq!(outcomes[1], ("a", FetchOutcome::Stale));
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_stale_failure_is_silent() {
        let api = MockApi::new();
        let notifier = RecordingNotifier::default();
        let fetcher = Fetcher::new("rows");
        let gate_a = api.gate_next_list();
        let gate_b = api.gate_next_list();

        let mut pool = LocalPool::new();
        for query in [QueryState::new(10), QueryState::new(10)] {
            let (api, notifier, fetcher) = (api.clone(), notifier.clone(), fetcher.clone());
            pool.spawner()
                .spawn_local(async move {
                    fetcher.fetch::<Row, _, _>(&api, &query, &notifier).await;
                })
                .unwrap();
            pool.run_until_stalled();
        }
        gate_b.send(Ok(ListResponse::BareArray(vec![]))).unwrap();
        gate_a.send(Err(ApiError::Network("reset".into()))).unwrap();
        pool.run();

        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_failure_notifies_and_empties() {
        let api = MockApi::new();
        api.push_list(Err(ApiError::Remote {
            status: 500,
            message: None,
        }));
        let notifier = RecordingNotifier::default();
        let outcome =
            block_on(Fetcher::new("leads").fetch::<Row, _, _>(&api, &QueryState::new(10), &notifier));
        assert_eq!(outcome, FetchOutcome::Applied(ListResult::empty()));

        let notices = notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert_eq!(notices[0].message, "Could not load leads");
    }

    #[test]
    fn test_success_false_is_silently_empty() {
        let api = MockApi::new();
        api.push_list_body(json!({ "success": false, "message": "nope" }));
        let notifier = RecordingNotifier::default();
        let outcome =
            block_on(Fetcher::new("rows").fetch::<Row, _, _>(&api, &QueryState::new(10), &notifier));
        assert_eq!(outcome, FetchOutcome::Applied(ListResult::empty()));
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_query_is_forwarded() {
        let api = MockApi::new();
        api.push_list_body(json!({ "data": { "data": [], "total": 0 } }));
        let mut query = QueryState::new(25);
        query.set_filter("status", "closed");
        query.set_page(2);
        block_on(Fetcher::new("rows").fetch::<Row, _, _>(&api, &query, &RecordingNotifier::default()));

        let sent = api.list_queries();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].page, 2);
        assert_eq!(sent[0].per_page, 25);
        assert_eq!(sent[0].filters.get("status").map(String::as_str), Some("closed"));
    }
}
