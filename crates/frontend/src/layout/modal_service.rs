use crate::shared::collection::notify::Confirmer;
use crate::shared::modal::Modal;
use async_trait::async_trait;
use futures::channel::oneshot;
use leptos::prelude::*;
use std::sync::{Arc, Mutex};
use thaw::*;

/// Вопрос, ожидающий ответа пользователя
#[derive(Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    reply: Arc<Mutex<Option<oneshot::Sender<bool>>>>,
}

impl ConfirmRequest {
    fn answer(&self, confirmed: bool) {
        let sender = self.reply.lock().ok().and_then(|mut slot| slot.take());
        if let Some(sender) = sender {
            let _ = sender.send(confirmed);
        }
    }
}

/// Сервис подтверждений: модальное окно вместо `window.confirm`
#[derive(Clone, Copy)]
pub struct ConfirmService {
    request: RwSignal<Option<ConfirmRequest>>,
}

impl ConfirmService {
    pub fn new() -> Self {
        Self {
            request: RwSignal::new(None),
        }
    }

    /// Показать вопрос; предыдущий неотвеченный вопрос считается отклонённым
    fn show(&self, title: &str, message: &str) -> oneshot::Receiver<bool> {
        let (tx, rx) = oneshot::channel();
        let request = ConfirmRequest {
            title: title.to_string(),
            message: message.to_string(),
            reply: Arc::new(Mutex::new(Some(tx))),
        };
        if let Some(previous) = self.request.try_update(|slot| slot.replace(request)).flatten() {
            previous.answer(false);
        }
        rx
    }

    pub fn answer(&self, confirmed: bool) {
        if let Some(request) = self.request.try_update(Option::take).flatten() {
            request.answer(confirmed);
        }
    }

    pub fn is_open(&self) -> bool {
        self.request.with(Option::is_some)
    }
}

impl Default for ConfirmService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Confirmer for ConfirmService {
    async fn confirm(&self, title: &str, message: &str) -> bool {
        // a dropped sender (service gone) counts as "no"
        self.show(title, message).await.unwrap_or(false)
    }
}

/// Компонент окна подтверждения; монтируется один раз в оболочке
#[component]
pub fn ConfirmHost() -> impl IntoView {
    let service = use_context::<ConfirmService>().expect("ConfirmService not provided in context");

    view! {
        {move || service.request.get().map(|request| {
            view! {
                <Modal
                    title=request.title.clone()
                    on_close=Callback::new(move |_| service.answer(false))
                >
                    <p class="confirm__message">{request.message.clone()}</p>
                    <div class="confirm__actions">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| service.answer(false)
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| service.answer(true)
                        >
                            "Confirm"
                        </Button>
                    </div>
                </Modal>
            }
        })}
    }
}
