use crate::domain::c203_campaign::entity::CampaignEntity;
use crate::shared::collection::ui::collection_page;
use leptos::prelude::*;

#[component]
pub fn CampaignList() -> impl IntoView {
    collection_page::<CampaignEntity>()
}
