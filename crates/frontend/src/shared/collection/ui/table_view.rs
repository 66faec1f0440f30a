use super::state::{spawn_action, PageHandle};
use crate::shared::collection::controller::CollectionState;
use crate::shared::collection::entity::{CollectionEntity, TransitionDef};
use crate::shared::collection::table::{
    present, CellModel, HeaderModel, PagerModel, RowModel, TableBody as BodyModel,
};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// Badge tone names used by column definitions
pub fn badge_color(tone: &str) -> BadgeColor {
    match tone {
        "success" => BadgeColor::Success,
        "warning" => BadgeColor::Warning,
        "danger" => BadgeColor::Danger,
        "informative" => BadgeColor::Informative,
        "subtle" => BadgeColor::Subtle,
        _ => BadgeColor::Brand,
    }
}

pub fn collection_table<E: CollectionEntity>(
    state: RwSignal<CollectionState<E>>,
    handle: PageHandle<E>,
) -> impl IntoView {
    let model = Memo::new(move |_| {
        state.with(|s| {
            present(
                &s.result.items,
                &E::columns(),
                E::record_id,
                s.shows_skeleton(),
                s.result.total_count,
                &s.query,
                E::PLURAL,
            )
        })
    });
    let column_count = E::columns().len();

    view! {
        <div class="table-wrapper">
            <Table attr:style="width: 100%;">
                <TableHeader>
                    <TableRow>
                        {move || {
                            model
                                .with(|m| m.headers.clone())
                                .into_iter()
                                .map(|header| header_cell(header, handle))
                                .collect_view()
                        }}
                        <TableHeaderCell min_width=120.0>"Actions"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || match model.with(|m| m.body.clone()) {
                        BodyModel::Loading { skeleton_rows } => {
                            (0..skeleton_rows)
                                .map(|_| skeleton_row(column_count))
                                .collect_view()
                                .into_any()
                        }
                        BodyModel::Empty { .. } => view! { <></> }.into_any(),
                        BodyModel::Rows(rows) => {
                            rows.into_iter().map(|row| row_view::<E>(row, handle)).collect_view().into_any()
                        }
                    }}
                </TableBody>
            </Table>
            {move || {
                model.with(|m| match &m.body {
                    BodyModel::Empty { message } => {
                        Some(view! { <div class="table__empty">{message.clone()}</div> })
                    }
                    _ => None,
                })
            }}
        </div>
    }
}

/// Range label and page controls
pub fn pager_view<E: CollectionEntity>(
    state: RwSignal<CollectionState<E>>,
    handle: PageHandle<E>,
    page_size_options: Vec<u32>,
) -> impl IntoView {
    let pager = Memo::new(move |_| {
        state.with(|s| PagerModel::new(&s.query, s.result.total_count))
    });

    view! {
        <div class="pager">
            <span class="pager__range">{move || pager.get().range_label()}</span>
            <PaginationControls
                current_page=Signal::derive(move || pager.get().page)
                total_pages=Signal::derive(move || pager.get().total_pages)
                total_count=Signal::derive(move || pager.get().total_count)
                page_size=Signal::derive(move || pager.get().page_size)
                on_page_change=Callback::new(move |page: u32| {
                    spawn_action(handle, move |c| async move { c.set_page(page).await })
                })
                on_page_size_change=Callback::new(move |size: u32| {
                    spawn_action(handle, move |c| async move { c.set_page_size(size).await })
                })
                page_size_options=page_size_options
            />
        </div>
    }
}

fn header_cell<E: CollectionEntity>(header: HeaderModel, handle: PageHandle<E>) -> AnyView {
    let align = header.align.css_class();
    if header.sortable {
        view! {
            <SortableHeaderCell
                label=header.label
                sort_field=header.key
                sorted=header.sorted
                on_sort=Callback::new(move |field: String| {
                    spawn_action(handle, move |c| async move { c.toggle_sort(&field).await })
                })
                align=if align.ends_with("right") { "right" } else { "left" }
            />
        }
        .into_any()
    } else {
        view! { <TableHeaderCell class=align>{header.label}</TableHeaderCell> }.into_any()
    }
}

fn skeleton_row(columns: usize) -> impl IntoView {
    view! {
        <TableRow class="table__row--skeleton">
            {(0..=columns)
                .map(|_| view! { <TableCell><div class="skeleton-line"></div></TableCell> })
                .collect_view()}
        </TableRow>
    }
}

fn cell_view(cell: CellModel) -> impl IntoView {
    let content = match cell.badge {
        Some(tone) => view! {
            <Badge appearance=BadgeAppearance::Tint color=badge_color(tone)>
                {cell.text}
            </Badge>
        }
        .into_any(),
        None => view! { <span>{cell.text}</span> }.into_any(),
    };
    view! { <TableCell class=cell.align.css_class()>{content}</TableCell> }
}

fn row_view<E: CollectionEntity>(row: RowModel<E::Record>, handle: PageHandle<E>) -> impl IntoView {
    let status = E::record_status(&row.record);
    let transitions: Vec<TransitionDef> = E::transitions()
        .into_iter()
        .filter(|t| (t.applies_to)(&status))
        .collect();
    let record = StoredValue::new(row.record);

    let transition_buttons = transitions
        .into_iter()
        .map(|def| {
            view! {
                <button
                    class="button button--small"
                    title=def.label
                    on:click=move |_| {
                        let target = record.get_value();
                        spawn_action(handle, move |c| async move {
                            c.transition(&target, &def).await;
                        });
                    }
                >
                    {icon("check")}
                    {format!(" {}", def.label)}
                </button>
            }
        })
        .collect_view();

    view! {
        <TableRow attr:data-id=row.id>
            {row.cells.into_iter().map(cell_view).collect_view()}
            <TableCell>
                <div class="table__actions">
                    <button
                        class="button button--icon"
                        title="View"
                        on:click=move |_| record.with_value(|r| handle.with_value(|c| c.view(r)))
                    >
                        {icon("eye")}
                    </button>
                    <button
                        class="button button--icon"
                        title="Edit"
                        on:click=move |_| record.with_value(|r| handle.with_value(|c| c.open_edit(r)))
                    >
                        {icon("edit")}
                    </button>
                    {transition_buttons}
                    <button
                        class="button button--icon button--danger"
                        title="Delete"
                        on:click=move |_| {
                            let target = record.get_value();
                            spawn_action(handle, move |c| async move {
                                c.delete(&target).await;
                            });
                        }
                    >
                        {icon("trash")}
                    </button>
                </div>
            </TableCell>
        </TableRow>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_color_fallback() {
        assert!(matches!(badge_color("success"), BadgeColor::Success));
        assert!(matches!(badge_color("danger"), BadgeColor::Danger));
        assert!(matches!(badge_color("whatever"), BadgeColor::Brand));
    }
}
