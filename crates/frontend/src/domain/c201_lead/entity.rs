use crate::shared::collection::api::EndpointSet;
use crate::shared::collection::entity::{CollectionEntity, FilterDef};
use crate::shared::collection::form::{FieldKind, FormField};
use crate::shared::collection::table::ColumnDef;
use crate::shared::components::table::format_money_opt;
use crate::shared::date_utils::format_date_opt;
use contracts::crm::lead::Lead;
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::SortDirection;
use contracts::shared::validation::Rule;

pub struct LeadEntity;

/// Status keys as configured under CRM settings (c204)
const STATUS_OPTIONS: &[(&str, &str)] = &[
    ("new", "New"),
    ("contacted", "Contacted"),
    ("qualified", "Qualified"),
    ("lost", "Lost"),
    ("won", "Won"),
];

fn status_label(key: &str) -> &str {
    STATUS_OPTIONS
        .iter()
        .find(|(value, _)| *value == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

fn status_tone(lead: &Lead) -> &'static str {
    match lead.status.as_deref() {
        Some("won") => "success",
        Some("lost") => "danger",
        Some("qualified") => "warning",
        _ => "informative",
    }
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "—".to_string())
}

impl CollectionEntity for LeadEntity {
    type Record = Lead;

    const PAGE_ID: &'static str = "c201_lead";
    const TITLE: &'static str = "Leads";
    const SINGULAR: &'static str = "lead";
    const PLURAL: &'static str = "leads";
    const ENDPOINTS: EndpointSet = EndpointSet::new("/api/crm/leads");

    fn record_id(record: &Lead) -> String {
        record.id.to_string()
    }

    fn record_label(record: &Lead) -> String {
        match &record.company {
            Some(company) if !company.is_empty() => format!("{} ({})", record.name, company),
            _ => record.name.clone(),
        }
    }

    fn record_status(record: &Lead) -> String {
        record.status.clone().unwrap_or_default()
    }

    fn columns() -> Vec<ColumnDef<Lead>> {
        vec![
            ColumnDef::new("name", "Name", |l: &Lead| l.name.clone()).sortable(),
            ColumnDef::new("company", "Company", |l: &Lead| or_dash(&l.company)).sortable(),
            ColumnDef::new("email", "Email", |l: &Lead| or_dash(&l.email)),
            ColumnDef::new("value", "Value", |l: &Lead| format_money_opt(l.value)).sortable().right(),
            ColumnDef::new("status", "Status", |l: &Lead| {
                status_label(l.status.as_deref().unwrap_or("new")).to_string()
            })
            .badge(status_tone),
            ColumnDef::new("created_at", "Created", |l: &Lead| {
                format_date_opt(l.created_at.as_deref())
            })
            .sortable(),
        ]
    }

    fn filters() -> Vec<FilterDef> {
        vec![
            FilterDef::select("status", "Status", STATUS_OPTIONS.to_vec()),
            FilterDef::text("source_id", "Source id"),
        ]
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("created_at", SortDirection::Desc))
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("company", "Company", FieldKind::Text),
            FormField::new("email", "Email", FieldKind::Email),
            FormField::new("value", "Value", FieldKind::Number),
            FormField::new("status", "Status", FieldKind::Select(STATUS_OPTIONS)),
            FormField::new("source_id", "Source id", FieldKind::Number),
        ]
    }

    fn form_defaults() -> DraftRecord {
        DraftRecord::from_pairs([("status", "new")])
    }

    fn project(record: &Lead) -> DraftRecord {
        DraftRecord::from_pairs([
            ("name", record.name.clone()),
            ("company", record.company.clone().unwrap_or_default()),
            ("email", record.email.clone().unwrap_or_default()),
            ("value", record.value.map(|v| v.to_string()).unwrap_or_default()),
            ("status", record.status.clone().unwrap_or_default()),
            (
                "source_id",
                record.source.as_ref().map(|s| s.id.to_string()).unwrap_or_default(),
            ),
        ])
    }

    fn rules(_mode: FormMode) -> Vec<Rule> {
        vec![
            Rule::required("name", "Name"),
            Rule::max_length("name", "Name", 150),
            Rule::NumberRange {
                field: "value",
                label: "Value",
                min: 0.0,
                max: 1_000_000_000.0,
            },
        ]
    }

    fn detail_rows(record: &Lead) -> Vec<(&'static str, String)> {
        vec![
            ("Name", record.name.clone()),
            ("Company", or_dash(&record.company)),
            ("Email", or_dash(&record.email)),
            ("Value", format_money_opt(record.value)),
            ("Status", status_label(record.status.as_deref().unwrap_or("new")).to_string()),
            (
                "Source",
                record
                    .source
                    .as_ref()
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| "—".to_string()),
            ),
            ("Created", format_date_opt(record.created_at.as_deref())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::form::FormController;
    use serde_json::json;

    #[test]
    fn test_source_is_flattened() {
        let lead: Lead = serde_json::from_value(json!({
            "id": 41,
            "name": "Jordan",
            "company": "Acme",
            "status": "qualified",
            "source": { "id": 2, "name": "Website" }
        }))
        .unwrap();

        let form = FormController::<LeadEntity>::open_edit(&lead);
        assert_eq!(form.draft().get("source_id"), "2");
        assert_eq!(form.draft().get("status"), "qualified");
        assert_eq!(LeadEntity::record_label(&lead), "Jordan (Acme)");
    }

    #[test]
    fn test_unknown_status_shows_raw_key() {
        assert_eq!(status_label("won"), "Won");
        assert_eq!(status_label("archived"), "archived");
    }
}
