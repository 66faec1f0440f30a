use crate::domain::c201_lead::entity::LeadEntity;
use crate::shared::collection::ui::collection_page;
use leptos::prelude::*;

#[component]
pub fn LeadList() -> impl IntoView {
    collection_page::<LeadEntity>()
}
