use crate::domain::h102_meeting::entity::MeetingEntity;
use crate::shared::collection::ui::collection_page;
use leptos::prelude::*;

#[component]
pub fn MeetingList() -> impl IntoView {
    collection_page::<MeetingEntity>()
}
