use crate::layout::modal_service::ConfirmService;
use crate::layout::toast_service::ToastService;
use crate::shared::collection::api::RestApi;
use crate::shared::collection::controller::{CollectionController, CollectionState, StateHandle};
use crate::shared::collection::entity::CollectionEntity;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

impl<S: Send + Sync + 'static> StateHandle<S> for RwSignal<S> {
    fn update_state<T>(&self, f: impl FnOnce(&mut S) -> T) -> Option<T> {
        self.try_update(f)
    }
}

pub type PageController<E> = CollectionController<
    E,
    RestApi<<E as CollectionEntity>::Record>,
    RwSignal<CollectionState<E>>,
    ToastService,
    ConfirmService,
>;

pub type PageHandle<E> = StoredValue<PageController<E>>;

/// Run an async controller operation from an event handler.
/// Does nothing once the page has been disposed.
pub fn spawn_action<E, F, Fut>(handle: PageHandle<E>, action: F)
where
    E: CollectionEntity,
    F: FnOnce(PageController<E>) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    if let Some(controller) = handle.try_get_value() {
        spawn_local(action(controller));
    }
}
