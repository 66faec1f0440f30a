use super::state::{spawn_action, PageHandle};
use crate::shared::collection::capitalize;
use crate::shared::collection::controller::CollectionState;
use crate::shared::collection::entity::CollectionEntity;
use crate::shared::collection::form::{FieldKind, FormField};
use crate::shared::modal::Modal;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

/// Read-only view of the selected record
pub fn detail_dialog<E: CollectionEntity>(
    state: RwSignal<CollectionState<E>>,
    handle: PageHandle<E>,
) -> impl IntoView {
    let viewing = Memo::new(move |_| state.with(|s| s.selection.viewing().cloned()));
    let close = Callback::new(move |_: ()| handle.with_value(|c| c.close_dialog()));

    move || {
        viewing.get().map(|record| {
            let title = format!("{}: {}", capitalize(E::SINGULAR), E::record_label(&record));
            let rows = E::detail_rows(&record);
            view! {
                <Modal title=title on_close=close class="modal--detail">
                    <dl class="detail-list">
                        {rows
                            .into_iter()
                            .map(|(label, value)| {
                                view! {
                                    <dt class="detail-list__label">{label}</dt>
                                    <dd class="detail-list__value">{value}</dd>
                                }
                            })
                            .collect_view()}
                    </dl>
                    <div class="modal-footer">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| handle.with_value(|c| c.open_edit(&record))
                        >
                            "Edit"
                        </Button>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| close.run(())>
                            "Close"
                        </Button>
                    </div>
                </Modal>
            }
        })
    }
}

/// Create/edit dialog. Closing discards the draft; a 422 keeps it open with
/// the server's messages under the fields.
pub fn form_dialog<E: CollectionEntity>(
    state: RwSignal<CollectionState<E>>,
    handle: PageHandle<E>,
) -> impl IntoView {
    // re-rendered only when a dialog opens or switches mode, not per keystroke
    let open = Memo::new(move |_| state.with(|s| s.form.as_ref().map(|f| (f.mode(), f.title()))));
    let saving =
        Signal::derive(move || state.with(|s| s.form.as_ref().is_some_and(|f| f.is_saving())));
    let close = Callback::new(move |_: ()| handle.with_value(|c| c.close_dialog()));
    let submit = move || {
        spawn_action(handle, |c| async move {
            if let Err(err) = c.submit_form().await {
                log::debug!("{} form not saved: {}", E::SINGULAR, err);
            }
        })
    };

    move || {
        open.get().map(|(mode, title)| {
            let fields: Vec<FormField> = E::form_fields()
                .into_iter()
                .filter(|f| f.visible_in(mode))
                .collect();
            view! {
                <Modal title=title on_close=close class="modal--form">
                    <div
                        class="form"
                        on:keydown=move |ev: ev::KeyboardEvent| {
                            if ev.key() == "Enter" && ev.ctrl_key() {
                                submit();
                            }
                        }
                    >
                        {fields.into_iter().map(|field| field_view(field, state, handle)).collect_view()}
                    </div>
                    <div class="modal-footer">
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| submit()
                            disabled=saving
                        >
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| close.run(())
                            disabled=saving
                        >
                            "Cancel"
                        </Button>
                    </div>
                </Modal>
            }
        })
    }
}

fn field_view<E: CollectionEntity>(
    field: FormField,
    state: RwSignal<CollectionState<E>>,
    handle: PageHandle<E>,
) -> impl IntoView {
    let name = field.name;
    let value = move || {
        state.with(|s| {
            s.form
                .as_ref()
                .map(|f| f.draft().get(name).to_string())
                .unwrap_or_default()
        })
    };
    let error = move || {
        state.with(|s| {
            s.form
                .as_ref()
                .and_then(|f| f.errors().get(name).map(str::to_string))
        })
    };
    let set = move |text: String| handle.with_value(|c| c.set_field(name, text));
    let input_id = format!("field-{name}");

    let input = match field.kind {
        FieldKind::TextArea => view! {
            <textarea
                id=input_id.clone()
                class="form__textarea"
                rows="4"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Select(options) => view! {
            <select
                id=input_id.clone()
                class="form__select"
                prop:value=value
                on:change=move |ev| set(event_target_value(&ev))
            >
                <option value="">"— select —"</option>
                {options
                    .iter()
                    .map(|(option, label)| {
                        view! {
                            <option value=*option selected=move || value() == *option>
                                {*label}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Checkbox => view! {
            <input
                id=input_id.clone()
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || value() == "true"
                on:change=move |ev| set(event_target_checked(&ev).to_string())
            />
        }
        .into_any(),
        kind => view! {
            <input
                id=input_id.clone()
                type=kind.input_type()
                class="form__input"
                step=if matches!(kind, FieldKind::Number) { Some("any") } else { None }
                placeholder=field.placeholder
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <div class="form__group" class:form__group--invalid=move || error().is_some()>
            <label class="form__label" for=input_id>
                {field.label}
                {field.required.then(|| view! { <span class="form__required">" *"</span> })}
            </label>
            {input}
            {move || error().map(|message| view! { <div class="form__error">{message}</div> })}
        </div>
    }
}
