use crate::domain::c202_contract::entity::ContractEntity;
use crate::shared::collection::ui::collection_page;
use leptos::prelude::*;

#[component]
pub fn ContractList() -> impl IntoView {
    collection_page::<ContractEntity>()
}
