use crate::shared::collection::notify::{Notice, NoticeLevel, Notifier};
use crate::shared::config::NotificationsConfig;
use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub notice: Notice,
}

/// Очередь всплывающих уведомлений
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<Toast>>,
    ttl: NotificationsConfig,
}

impl ToastService {
    pub fn new(ttl: NotificationsConfig) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            ttl,
        }
    }

    pub fn push(&self, notice: Notice) -> Uuid {
        let id = Uuid::new_v4();
        let ttl_ms = match notice.level {
            NoticeLevel::Success => self.ttl.success_ttl_ms,
            NoticeLevel::Error | NoticeLevel::Warning => self.ttl.error_ttl_ms,
        };
        self.toasts.update(|list| list.push(Toast { id, notice }));

        let this = *self;
        spawn_local(async move {
            TimeoutFuture::new(ttl_ms).await;
            this.dismiss(id);
        });
        id
    }

    pub fn dismiss(&self, id: Uuid) {
        // the host may already be gone when the timer fires
        self.toasts.try_update(|list| list.retain(|t| t.id != id));
    }
}

impl Notifier for ToastService {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => log::warn!("toast: {}: {}", notice.title, notice.message),
            _ => log::debug!("toast: {}: {}", notice.title, notice.message),
        }
        self.push(notice);
    }
}

/// Renders the toast stack; mounted once in the shell
#[component]
pub fn ToastHost() -> impl IntoView {
    let service = use_context::<ToastService>().expect("ToastService not provided in context");

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || service.toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let class = format!("toast {}", toast.notice.level.css_class());
                    view! {
                        <div class=class>
                            <div class="toast__body">
                                <div class="toast__title">{toast.notice.title}</div>
                                <div class="toast__message">{toast.notice.message}</div>
                            </div>
                            <button
                                class="button button--icon toast__close"
                                on:click=move |_| service.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
