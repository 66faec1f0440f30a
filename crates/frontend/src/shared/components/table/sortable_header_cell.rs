//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Примеры
//!
//! ```ignore
//! <SortableHeaderCell
//!     label="Budget"
//!     sort_field="budget"
//!     sorted=Signal::derive(move || header.sorted)
//!     on_sort=Callback::new(move |field| toggle_sort(field))
//!     align="right"
//! />
//! ```

use contracts::shared::list::SortDirection;
use leptos::prelude::*;
use thaw::*;

/// ▲ / ▼ on the sorted column, ⇅ elsewhere
pub fn sort_indicator(sorted: Option<SortDirection>) -> &'static str {
    match sorted {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => " ⇅",
    }
}

pub fn sort_class(sorted: Option<SortDirection>) -> &'static str {
    if sorted.is_some() {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Компонент сортируемой ячейки заголовка таблицы
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки (`order_by`)
    #[prop(into)]
    sort_field: String,

    /// Направление, если таблица отсортирована по этому полю
    #[prop(into)]
    sorted: Signal<Option<SortDirection>>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell resizable=true min_width=min_width class="resizable">
            <div
                class="table__sortable-header"
                style=header_style
                aria-sort=move || match sorted.get() {
                    Some(SortDirection::Asc) => "ascending",
                    Some(SortDirection::Desc) => "descending",
                    None => "none",
                }
                on:click=move |_| on_sort.run(sort_field.clone())
            >
                {label}
                <span class=move || sort_class(sorted.get())>
                    {move || sort_indicator(sorted.get())}
                </span>
            </div>
        </TableHeaderCell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(sort_indicator(Some(SortDirection::Asc)), " ▲");
        assert_eq!(sort_indicator(Some(SortDirection::Desc)), " ▼");
        assert_eq!(sort_indicator(None), " ⇅");
        assert!(sort_class(None).ends_with("indicator"));
    }
}
