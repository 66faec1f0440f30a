//! Row actions: view / edit / delete / status transitions.
//!
//! Delete and transitions follow confirm → call → refresh → notify. A declined
//! confirmation makes no call; failures are terminal for that user action.

use super::api::CollectionApi;
use super::capitalize;
use super::entity::{CollectionEntity, TransitionDef};
use super::notify::{Confirmer, Notice, Notifier};
use std::future::Future;
use std::marker::PhantomData;

/// Record the open dialog is about; at most one at a time
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionContext<R> {
    #[default]
    Idle,
    Viewing(R),
    Editing(R),
    Deleting(R),
}

impl<R> SelectionContext<R> {
    pub fn record(&self) -> Option<&R> {
        match self {
            SelectionContext::Idle => None,
            SelectionContext::Viewing(r)
            | SelectionContext::Editing(r)
            | SelectionContext::Deleting(r) => Some(r),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionContext::Idle)
    }

    pub fn viewing(&self) -> Option<&R> {
        match self {
            SelectionContext::Viewing(r) => Some(r),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Completed,
    /// User declined the confirmation
    Cancelled,
    Failed(String),
}

pub struct ActionDispatcher<'a, E, A: ?Sized, N: ?Sized, C: ?Sized> {
    api: &'a A,
    notifier: &'a N,
    confirmer: &'a C,
    _entity: PhantomData<fn() -> E>,
}

impl<'a, E, A, N, C> ActionDispatcher<'a, E, A, N, C>
where
    E: CollectionEntity,
    A: CollectionApi<E::Record> + ?Sized,
    N: Notifier + ?Sized,
    C: Confirmer + ?Sized,
{
    pub fn new(api: &'a A, notifier: &'a N, confirmer: &'a C) -> Self {
        Self {
            api,
            notifier,
            confirmer,
            _entity: PhantomData,
        }
    }

    pub async fn delete<F, Fut>(&self, record: &E::Record, refresh: F) -> ActionOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        let label = E::record_label(record);
        let confirmed = self
            .confirmer
            .confirm(
                &format!("Delete {}", E::SINGULAR),
                &format!("Are you sure you want to delete \"{}\"? This cannot be undone.", label),
            )
            .await;
        if !confirmed {
            return ActionOutcome::Cancelled;
        }

        let id = E::record_id(record);
        log::debug!("delete {} {}", E::SINGULAR, id);
        match self.api.delete(&id).await {
            Ok(()) => {
                refresh().await;
                self.notifier.notify(Notice::success(
                    "Deleted",
                    format!("{} deleted successfully", capitalize(E::SINGULAR)),
                ));
                ActionOutcome::Completed
            }
            Err(err) => {
                log::error!("delete {} {} failed: {}", E::SINGULAR, id, err);
                let message = err.user_message(&format!("Could not delete {}", E::SINGULAR));
                self.notifier.notify(Notice::error("Error", message.clone()));
                ActionOutcome::Failed(message)
            }
        }
    }

    pub async fn transition<F, Fut>(
        &self,
        record: &E::Record,
        def: &TransitionDef,
        refresh: F,
    ) -> ActionOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ()>,
    {
        if !self.confirmer.confirm(def.confirm_title, def.confirm_message).await {
            return ActionOutcome::Cancelled;
        }

        let id = E::record_id(record);
        log::debug!("{} {} {}", def.action, E::SINGULAR, id);
        match self.api.action(&id, def.action).await {
            Ok(()) => {
                refresh().await;
                self.notifier
                    .notify(Notice::success("Success", def.success_message));
                ActionOutcome::Completed
            }
            Err(err) => {
                log::error!("{} {} {} failed: {}", def.action, E::SINGULAR, id, err);
                let message = err.user_message(def.failure_message);
                self.notifier.notify(Notice::error("Error", message.clone()));
                ActionOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::api::ApiError;
    use crate::shared::collection::notify::NoticeLevel;
    use crate::shared::collection::testing::{
        row, Call, MockApi, RecordingNotifier, ScriptedConfirmer, TestEntity, ACTIVATE,
    };
    use futures::executor::block_on;
    use std::cell::Cell;

    type Dispatcher<'a> =
        ActionDispatcher<'a, TestEntity, MockApi, RecordingNotifier, ScriptedConfirmer>;

    #[test]
    fn test_declined_delete_makes_no_call() {
        let api = MockApi::new();
        let notifier = RecordingNotifier::default();
        let confirmer = ScriptedConfirmer::answering(false);
        let refreshed = Cell::new(0);
        let counter = &refreshed;

        let outcome = block_on(Dispatcher::new(&api, &notifier, &confirmer).delete(
            &row(1, "One"),
            || async move { counter.set(counter.get() + 1) },
        ));
        assert_eq!(outcome, ActionOutcome::Cancelled);
        assert!(api.calls().is_empty());
        assert_eq!(refreshed.get(), 0);
        assert_eq!(confirmer.asked().len(), 1);
        assert!(confirmer.asked()[0].1.contains("\"One\""));
    }

    #[test]
    fn test_delete_refreshes_then_notifies() {
        let api = MockApi::new();
        let notifier = RecordingNotifier::default();
        let confirmer = ScriptedConfirmer::answering(true);
        let notices_at_refresh = Cell::new(usize::MAX);
        let (seen, recorded) = (&notices_at_refresh, &notifier);

        let outcome = block_on(Dispatcher::new(&api, &notifier, &confirmer).delete(
            &row(4, "Four"),
            || async move { seen.set(recorded.notices().len()) },
        ));
        assert_eq!(outcome, ActionOutcome::Completed);
        assert_eq!(api.calls(), vec![Call::Delete("4".into())]);
        assert_eq!(notices_at_refresh.get(), 0);
        assert_eq!(notifier.notices()[0].message, "Row deleted successfully");
    }

    #[test]
    fn test_failed_delete_does_not_refresh() {
        let api = MockApi::new();
        api.push_unit(Err(ApiError::Network("offline".into())));
        let notifier = RecordingNotifier::default();
        let confirmer = ScriptedConfirmer::answering(true);
        let refreshed = Cell::new(false);
        let flag = &refreshed;

        let outcome = block_on(
            Dispatcher::new(&api, &notifier, &confirmer)
                .delete(&row(4, "Four"), || async move { flag.set(true) }),
        );
        assert_eq!(outcome, ActionOutcome::Failed("Could not delete row".into()));
        assert!(!refreshed.get());
        assert_eq!(notifier.notices()[0].level, NoticeLevel::Error);
    }

    #[test]
    fn test_transition_failure_surfaces_remote_message() {
        let api = MockApi::new();
        api.push_unit(Err(ApiError::Remote {
            status: 422,
            message: Some("Only draft cycles can be activated".into()),
        }));
        let notifier = RecordingNotifier::default();
        let confirmer = ScriptedConfirmer::answering(true);

        let outcome = block_on(Dispatcher::new(&api, &notifier, &confirmer).transition(
            &row(2, "Two"),
            &ACTIVATE,
            || async {},
        ));
        assert_eq!(
            outcome,
            ActionOutcome::Failed("Only draft cycles can be activated".into())
        );
        assert_eq!(api.calls(), vec![Call::Action("2".into(), "activate".into())]);
        assert_eq!(notifier.notices()[0].message, "Only draft cycles can be activated");
    }

    #[test]
    fn test_transition_rejection_with_field_errors_keeps_message() {
        let api = MockApi::new();
        api.push_unit(Err(ApiError::from_response(
            422,
            r#"{"message":"Only draft cycles can be activated","errors":{"status":["Invalid status"]}}"#,
        )));
        let notifier = RecordingNotifier::default();
        let confirmer = ScriptedConfirmer::answering(true);

        let outcome = block_on(Dispatcher::new(&api, &notifier, &confirmer).transition(
            &row(2, "Two"),
            &ACTIVATE,
            || async {},
        ));
        assert_eq!(
            outcome,
            ActionOutcome::Failed("Only draft cycles can be activated".into())
        );
        assert_eq!(notifier.notices()[0].message, "Only draft cycles can be activated");
    }

    #[test]
    fn test_transition_success() {
        let api = MockApi::new();
        let notifier = RecordingNotifier::default();
        let confirmer = ScriptedConfirmer::answering(true);
        let refreshed = Cell::new(false);
        let flag = &refreshed;

        let outcome = block_on(Dispatcher::new(&api, &notifier, &confirmer).transition(
            &row(2, "Two"),
            &ACTIVATE,
            || async move { flag.set(true) },
        ));
        assert_eq!(outcome, ActionOutcome::Completed);
        assert!(refreshed.get());
        assert_eq!(confirmer.asked()[0].0, ACTIVATE.confirm_title);
        assert_eq!(notifier.notices()[0].message, ACTIVATE.success_message);
    }

    #[test]
    fn test_selection_holds_one_record() {
        let mut selection = SelectionContext::Viewing(row(1, "One"));
        assert_eq!(selection.viewing().map(|r| r.id), Some(1));
        selection = SelectionContext::Deleting(row(2, "Two"));
        assert!(selection.viewing().is_none());
        assert_eq!(selection.record().map(|r| r.id), Some(2));
        selection = SelectionContext::default();
        assert!(selection.is_idle());
    }
}
