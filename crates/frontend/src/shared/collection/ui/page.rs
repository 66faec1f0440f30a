use super::dialogs::{detail_dialog, form_dialog};
use super::filter_panel::filter_panel;
use super::state::{spawn_action, PageHandle};
use super::table_view::collection_table;
use crate::layout::modal_service::ConfirmService;
use crate::layout::toast_service::ToastService;
use crate::shared::api_utils::api_base;
use crate::shared::collection::api::RestApi;
use crate::shared::collection::controller::{CollectionController, CollectionState};
use crate::shared::collection::entity::CollectionEntity;
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::page_id;
use leptos::prelude::*;
use thaw::*;

/// Full list page for one entity: header, filters, table, pager and dialogs.
pub fn collection_page<E: CollectionEntity>() -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let toasts = use_context::<ToastService>().expect("ToastService not provided in context");
    let confirm =
        use_context::<ConfirmService>().expect("ConfirmService not provided in context");

    let state = RwSignal::new(CollectionState::<E>::new(config.list.default_page_size));
    let api = RestApi::new(api_base(&config.api), E::ENDPOINTS);
    let handle: PageHandle<E> =
        StoredValue::new(CollectionController::new(api, state, toasts, confirm));

    log::debug!("{} page mounted", E::PAGE_ID);
    spawn_action(handle, |c| async move { c.refresh().await });

    let total = Memo::new(move |_| state.with(|s| s.result.total_count));
    let loading = Signal::derive(move || state.with(|s| s.loading));

    view! {
        <PageFrame page_id=page_id(E::PAGE_ID, E::PAGE_CATEGORY) category=E::PAGE_CATEGORY>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{E::TITLE}</h1>
                    <Badge appearance=BadgeAppearance::Tint>
                        {move || total.get().to_string()}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| handle.with_value(|c| c.open_create())
                    >
                        {icon("plus")}
                        {format!(" New {}", E::SINGULAR)}
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| spawn_action(handle, |c| async move { c.refresh().await })
                        disabled=loading
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {filter_panel::<E>(state, handle, config.page_size_options())}
                {collection_table::<E>(state, handle)}
            </div>

            {detail_dialog::<E>(state, handle)}
            {form_dialog::<E>(state, handle)}
        </PageFrame>
    }
}
