use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::modal_service::ConfirmService;
use crate::layout::toast_service::ToastService;
use crate::shared::collection::notify::Notifier;
use crate::shared::config::load_config_or_default;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let (config, config_warning) = load_config_or_default();
    log::info!("API base: {}", crate::shared::api_utils::api_base(&config.api));

    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());
    let toasts = ToastService::new(config.notifications);
    if let Some(notice) = config_warning {
        toasts.notify(notice);
    }
    provide_context(toasts);
    provide_context(ConfirmService::new());
    provide_context(config);

    view! {
        <AppShell />
    }
}
