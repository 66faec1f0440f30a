use crate::shared::collection::api::EndpointSet;
use crate::shared::collection::entity::{CollectionEntity, FilterDef, TransitionDef};
use crate::shared::collection::form::{FieldKind, FormField};
use crate::shared::collection::table::ColumnDef;
use crate::shared::components::table::format_money_opt;
use crate::shared::date_utils::{format_date, format_date_opt, input_date};
use contracts::crm::contract::{Contract, ContractStatus};
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::SortDirection;
use contracts::shared::validation::Rule;

pub struct ContractEntity;

const SIGN: TransitionDef = TransitionDef {
    action: "sign",
    label: "Sign",
    confirm_title: "Sign contract",
    confirm_message: "Mark this contract as signed? Amount and dates become read-only.",
    success_message: "Contract signed",
    failure_message: "Could not sign contract",
    applies_to: |status| status == ContractStatus::Draft.as_str(),
};

fn status_tone(contract: &Contract) -> &'static str {
    match contract.status {
        ContractStatus::Signed => "success",
        ContractStatus::Expired => "danger",
        _ => "subtle",
    }
}

fn lead_name(contract: &Contract) -> String {
    contract
        .lead
        .as_ref()
        .map(|l| l.name.clone())
        .unwrap_or_else(|| "—".to_string())
}

fn amount(contract: &Contract) -> String {
    format_money_opt(contract.amount)
}

impl CollectionEntity for ContractEntity {
    type Record = Contract;

    const PAGE_ID: &'static str = "c202_contract";
    const TITLE: &'static str = "Contracts";
    const SINGULAR: &'static str = "contract";
    const PLURAL: &'static str = "contracts";
    const ENDPOINTS: EndpointSet = EndpointSet::new("/api/crm/contracts");

    fn record_id(record: &Contract) -> String {
        record.id.to_string()
    }

    fn record_label(record: &Contract) -> String {
        record.subject.clone()
    }

    fn record_status(record: &Contract) -> String {
        record.status.as_str().to_string()
    }

    fn columns() -> Vec<ColumnDef<Contract>> {
        vec![
            ColumnDef::new("subject", "Subject", |c: &Contract| c.subject.clone()).sortable(),
            ColumnDef::new("lead", "Lead", lead_name),
            ColumnDef::new("amount", "Amount", amount).sortable().right(),
            ColumnDef::new("start_date", "Start", |c: &Contract| format_date(&c.start_date))
                .sortable(),
            ColumnDef::new("end_date", "End", |c: &Contract| format_date_opt(c.end_date.as_deref())),
            ColumnDef::new("status", "Status", |c: &Contract| c.status.label().to_string())
                .badge(status_tone),
        ]
    }

    fn filters() -> Vec<FilterDef> {
        vec![FilterDef::select(
            "status",
            "Status",
            ContractStatus::ALL.iter().map(|s| (s.as_str(), s.label())).collect(),
        )]
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("start_date", SortDirection::Desc))
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("subject", "Subject", FieldKind::Text).required(),
            FormField::new("lead_id", "Lead id", FieldKind::Number),
            FormField::new("amount", "Amount", FieldKind::Number),
            FormField::new("start_date", "Start date", FieldKind::Date).required(),
            FormField::new("end_date", "End date", FieldKind::Date),
        ]
    }

    fn form_defaults() -> DraftRecord {
        DraftRecord::new()
    }

    fn project(record: &Contract) -> DraftRecord {
        DraftRecord::from_pairs([
            ("subject", record.subject.clone()),
            (
                "lead_id",
                record.lead.as_ref().map(|l| l.id.to_string()).unwrap_or_default(),
            ),
            ("amount", record.amount.map(|a| a.to_string()).unwrap_or_default()),
            ("start_date", input_date(&record.start_date)),
            (
                "end_date",
                record.end_date.as_deref().map(input_date).unwrap_or_default(),
            ),
        ])
    }

    fn rules(_mode: FormMode) -> Vec<Rule> {
        vec![
            Rule::required("subject", "Subject"),
            Rule::max_length("subject", "Subject", 200),
            Rule::NumberRange {
                field: "amount",
                label: "Amount",
                min: 0.0,
                max: 1_000_000_000.0,
            },
            Rule::required("start_date", "Start date"),
            Rule::DateNotBefore {
                start: "start_date",
                end: "end_date",
            },
        ]
    }

    fn transitions() -> Vec<TransitionDef> {
        vec![SIGN]
    }

    fn detail_rows(record: &Contract) -> Vec<(&'static str, String)> {
        vec![
            ("Subject", record.subject.clone()),
            ("Lead", lead_name(record)),
            ("Amount", amount(record)),
            ("Start", format_date(&record.start_date)),
            ("End", format_date_opt(record.end_date.as_deref())),
            ("Status", record.status.label().to_string()),
            ("Signed", format_date_opt(record.signed_at.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::form::FormController;

    #[test]
    fn test_open_ended_contract_is_valid() {
        let mut form = FormController::<ContractEntity>::open_create();
        form.set_field("subject", "Support 2026");
        form.set_field("start_date", "2026-01-01");
        assert!(form.validate().is_empty());

        form.set_field("end_date", "2025-12-31");
        assert_eq!(
            form.validate().get("end_date"),
            Some("End date cannot be before start date")
        );
    }

    #[test]
    fn test_sign_only_drafts() {
        assert!((SIGN.applies_to)("draft"));
        assert!(!(SIGN.applies_to)("signed"));
    }
}
