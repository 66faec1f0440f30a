use super::state::{spawn_action, PageHandle};
use super::table_view::pager_view;
use crate::shared::collection::controller::CollectionState;
use crate::shared::collection::entity::{CollectionEntity, FilterDef};
use crate::shared::collection::query_state::QueryState;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::icons::icon;
use leptos::ev;
use leptos::prelude::*;
use thaw::*;

/// Chips for whatever narrows the list. A `None` key is the search text.
fn active_tags(query: &QueryState, defs: &[FilterDef]) -> Vec<(Option<&'static str>, String)> {
    let mut tags = Vec::new();
    if !query.search_text().is_empty() {
        tags.push((None, format!("Search: {}", query.search_text())));
    }
    for def in defs {
        let value = query.filter(def.key);
        if value.is_empty() {
            continue;
        }
        let shown = def
            .options
            .iter()
            .find(|(option, _)| *option == value)
            .map(|(_, label)| *label)
            .unwrap_or(value);
        tags.push((Some(def.key), format!("{}: {}", def.label, shown)));
    }
    tags
}

/// Search box, per-entity filters, active chips and the pager. Search text
/// is staged while typing and applied on Enter or the Search button.
pub fn filter_panel<E: CollectionEntity>(
    state: RwSignal<CollectionState<E>>,
    handle: PageHandle<E>,
    page_size_options: Vec<u32>,
) -> impl IntoView {
    let is_expanded = RwSignal::new(true);
    let tags = Memo::new(move |_| state.with(|s| active_tags(&s.query, &E::filters())));
    let pending = move || state.with(|s| s.query.pending_search().to_string());
    let submit = move || spawn_action(handle, |c| async move { c.submit_search().await });

    let remove_tag = move |key: Option<&'static str>| {
        spawn_action(handle, move |c| async move {
            match key {
                Some(key) => c.set_filter(key, "").await,
                None => {
                    c.set_search_text("");
                    c.submit_search().await;
                }
            }
        })
    };

    let chips = view! {
        {move || {
            tags.get()
                .into_iter()
                .map(|(key, label)| {
                    view! {
                        <FilterTag label=label on_remove=Callback::new(move |_| remove_tag(key)) />
                    }
                })
                .collect_view()
        }}
    }
    .into_any();

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=Signal::derive(move || tags.with(Vec::len))
            toolbar=pager_view(state, handle, page_size_options).into_any()
            filter_tags=chips
        >
            <div class="filter-panel__row">
                <div class="filter-panel__search">
                    <input
                        type="search"
                        class="form__input"
                        placeholder=format!("Search {}", E::PLURAL)
                        prop:value=pending
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            handle.with_value(|c| c.set_search_text(&text));
                        }
                        on:keydown=move |ev: ev::KeyboardEvent| {
                            if ev.key() == "Enter" {
                                submit();
                            }
                        }
                    />
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| submit()>
                        {icon("search")}
                        " Search"
                    </Button>
                </div>
                {E::filters()
                    .into_iter()
                    .map(|def| filter_control(def, state, handle))
                    .collect_view()}
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| spawn_action(handle, |c| async move { c.reset_filters().await })
                    disabled=Signal::derive(move || tags.with(Vec::is_empty))
                >
                    {icon("x")}
                    " Reset"
                </Button>
            </div>
        </FilterPanel>
    }
}

fn filter_control<E: CollectionEntity>(
    def: FilterDef,
    state: RwSignal<CollectionState<E>>,
    handle: PageHandle<E>,
) -> AnyView {
    let key = def.key;
    let current = move || state.with(|s| s.query.filter(key).to_string());
    let apply = move |value: String| {
        spawn_action(handle, move |c| async move { c.set_filter(key, &value).await })
    };

    if def.options.is_empty() {
        view! {
            <label class="filter-panel__field">
                <span class="filter-panel__label">{def.label}</span>
                <input
                    type="text"
                    class="form__input"
                    prop:value=current
                    on:change=move |ev| apply(event_target_value(&ev))
                />
            </label>
        }
        .into_any()
    } else {
        view! {
            <label class="filter-panel__field">
                <span class="filter-panel__label">{def.label}</span>
                <select
                    class="form__select"
                    prop:value=current
                    on:change=move |ev| apply(event_target_value(&ev))
                >
                    <option value="">"All"</option>
                    {def
                        .options
                        .into_iter()
                        .map(|(value, label)| {
                            view! {
                                <option value=value selected=move || current() == value>
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </label>
        }
        .into_any()
    }
}
