use crate::domain::h101_appraisal_cycle::entity::AppraisalCycleEntity;
use crate::shared::collection::ui::collection_page;
use leptos::prelude::*;

#[component]
pub fn AppraisalCycleList() -> impl IntoView {
    collection_page::<AppraisalCycleEntity>()
}
