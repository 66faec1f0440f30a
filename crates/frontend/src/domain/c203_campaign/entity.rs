use crate::shared::collection::api::EndpointSet;
use crate::shared::collection::entity::{CollectionEntity, FilterDef, TransitionDef};
use crate::shared::collection::form::{FieldKind, FormField};
use crate::shared::collection::table::ColumnDef;
use crate::shared::components::table::format_money_opt;
use crate::shared::date_utils::{format_date_opt, input_date};
use contracts::crm::campaign::{Campaign, CampaignStatus};
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::SortDirection;
use contracts::shared::validation::Rule;

pub struct CampaignEntity;

const ACTIVATE: TransitionDef = TransitionDef {
    action: "activate",
    label: "Activate",
    confirm_title: "Activate campaign",
    confirm_message: "Start this campaign now?",
    success_message: "Campaign activated",
    failure_message: "Could not activate campaign",
    applies_to: |status| {
        status == CampaignStatus::Planned.as_str() || status == CampaignStatus::Paused.as_str()
    },
};

const PAUSE: TransitionDef = TransitionDef {
    action: "pause",
    label: "Pause",
    confirm_title: "Pause campaign",
    confirm_message: "Pause this campaign? It can be activated again later.",
    success_message: "Campaign paused",
    failure_message: "Could not pause campaign",
    applies_to: |status| status == CampaignStatus::Active.as_str(),
};

fn status_tone(campaign: &Campaign) -> &'static str {
    match campaign.status {
        CampaignStatus::Active => "success",
        CampaignStatus::Paused => "warning",
        CampaignStatus::Completed => "subtle",
        _ => "informative",
    }
}

fn budget(campaign: &Campaign) -> String {
    format_money_opt(campaign.budget)
}

fn period(campaign: &Campaign) -> String {
    format!(
        "{} – {}",
        format_date_opt(campaign.start_date.as_deref()),
        format_date_opt(campaign.end_date.as_deref())
    )
}

impl CollectionEntity for CampaignEntity {
    type Record = Campaign;

    const PAGE_ID: &'static str = "c203_campaign";
    const TITLE: &'static str = "Campaigns";
    const SINGULAR: &'static str = "campaign";
    const PLURAL: &'static str = "campaigns";
    const ENDPOINTS: EndpointSet = EndpointSet::new("/api/crm/campaigns");

    fn record_id(record: &Campaign) -> String {
        record.id.to_string()
    }

    fn record_label(record: &Campaign) -> String {
        record.name.clone()
    }

    fn record_status(record: &Campaign) -> String {
        record.status.as_str().to_string()
    }

    fn columns() -> Vec<ColumnDef<Campaign>> {
        vec![
            ColumnDef::new("name", "Name", |c: &Campaign| c.name.clone()).sortable(),
            ColumnDef::new("budget", "Budget", budget).sortable().right(),
            ColumnDef::new("start_date", "Period", period).sortable(),
            ColumnDef::new("status", "Status", |c: &Campaign| c.status.label().to_string())
                .badge(status_tone),
        ]
    }

    fn filters() -> Vec<FilterDef> {
        vec![FilterDef::select(
            "status",
            "Status",
            CampaignStatus::ALL.iter().map(|s| (s.as_str(), s.label())).collect(),
        )]
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("start_date", SortDirection::Desc))
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("budget", "Budget", FieldKind::Number),
            FormField::new("start_date", "Start date", FieldKind::Date),
            FormField::new("end_date", "End date", FieldKind::Date),
            FormField::new("landing_url", "Landing page", FieldKind::Url)
                .placeholder("https://"),
        ]
    }

    fn form_defaults() -> DraftRecord {
        DraftRecord::new()
    }

    fn project(record: &Campaign) -> DraftRecord {
        DraftRecord::from_pairs([
            ("name", record.name.clone()),
            ("budget", record.budget.map(|b| b.to_string()).unwrap_or_default()),
            (
                "start_date",
                record.start_date.as_deref().map(input_date).unwrap_or_default(),
            ),
            (
                "end_date",
                record.end_date.as_deref().map(input_date).unwrap_or_default(),
            ),
            ("landing_url", record.landing_url.clone().unwrap_or_default()),
        ])
    }

    fn rules(_mode: FormMode) -> Vec<Rule> {
        vec![
            Rule::required("name", "Name"),
            Rule::max_length("name", "Name", 120),
            Rule::NumberRange {
                field: "budget",
                label: "Budget",
                min: 0.0,
                max: 100_000_000.0,
            },
            Rule::DateNotBefore {
                start: "start_date",
                end: "end_date",
            },
            Rule::Url {
                field: "landing_url",
                label: "Landing page",
            },
        ]
    }

    fn transitions() -> Vec<TransitionDef> {
        vec![ACTIVATE, PAUSE]
    }

    fn detail_rows(record: &Campaign) -> Vec<(&'static str, String)> {
        vec![
            ("Name", record.name.clone()),
            ("Budget", budget(record)),
            ("Period", period(record)),
            ("Landing page", record.landing_url.clone().unwrap_or_else(|| "—".to_string())),
            ("Status", record.status.label().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::form::FormController;

    #[test]
    fn test_budget_and_landing_page_checks() {
        let mut form = FormController::<CampaignEntity>::open_create();
        form.set_field("name", "Spring promo");
        form.set_field("budget", "abc");
        form.set_field("landing_url", "example");

        let errors = form.validate();
        assert_eq!(errors.get("budget"), Some("Budget must be a number"));
        assert_eq!(errors.get("landing_url"), Some("Landing page must be a valid URL"));
    }

    #[test]
    fn test_pause_and_resume() {
        assert!((PAUSE.applies_to)("active"));
        assert!((ACTIVATE.applies_to)("paused"));
        assert!(!(ACTIVATE.applies_to)("completed"));
    }
}
