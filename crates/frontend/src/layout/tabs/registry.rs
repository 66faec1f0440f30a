//! Tab content registry - единственный источник правды для маппинга tab.key → View

use crate::domain::c201_lead::ui::list::LeadList;
use crate::domain::c202_contract::ui::list::ContractList;
use crate::domain::c203_campaign::ui::list::CampaignList;
use crate::domain::c204_lead_status::ui::list::LeadStatusList;
use crate::domain::h101_appraisal_cycle::ui::list::AppraisalCycleList;
use crate::domain::h102_meeting::ui::list::MeetingList;
use crate::domain::h103_job_application::ui::list::JobApplicationList;
use leptos::prelude::*;

/// Рендерит контент таба по его ключу.
///
/// Unknown keys (a stale `?active=` link) get a placeholder.
pub fn render_tab_content(key: &str) -> AnyView {
    match key {
        // HR (h1xx)
        "h101_appraisal_cycle" => view! { <AppraisalCycleList /> }.into_any(),
        "h102_meeting" => view! { <MeetingList /> }.into_any(),
        "h103_job_application" => view! { <JobApplicationList /> }.into_any(),

        // CRM (c2xx)
        "c201_lead" => view! { <LeadList /> }.into_any(),
        "c202_contract" => view! { <ContractList /> }.into_any(),
        "c203_campaign" => view! { <CampaignList /> }.into_any(),
        "c204_lead_status" => view! { <LeadStatusList /> }.into_any(),

        _ => {
            log::warn!("unknown tab key: {}", key);
            view! { <div class="placeholder">{format!("Unknown page: {key}")}</div> }.into_any()
        }
    }
}
