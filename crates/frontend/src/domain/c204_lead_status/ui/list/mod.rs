use crate::domain::c204_lead_status::entity::LeadStatusEntity;
use crate::shared::collection::ui::collection_page;
use leptos::prelude::*;

#[component]
pub fn LeadStatusList() -> impl IntoView {
    collection_page::<LeadStatusEntity>()
}
