use crate::domain::h103_job_application::entity::JobApplicationEntity;
use crate::shared::collection::ui::collection_page;
use leptos::prelude::*;

#[component]
pub fn JobApplicationList() -> impl IntoView {
    collection_page::<JobApplicationEntity>()
}
