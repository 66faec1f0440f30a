use crate::shared::collection::api::EndpointSet;
use crate::shared::collection::entity::CollectionEntity;
use crate::shared::collection::form::{FieldKind, FormField};
use crate::shared::collection::table::ColumnDef;
use crate::shared::page_standard::PAGE_CAT_SETTINGS;
use contracts::crm::lead_status::LeadStatus;
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::SortDirection;
use contracts::shared::validation::Rule;

/// Pipeline stages shown on leads
pub struct LeadStatusEntity;

impl CollectionEntity for LeadStatusEntity {
    type Record = LeadStatus;

    const PAGE_ID: &'static str = "c204_lead_status";
    const TITLE: &'static str = "Lead statuses";
    const SINGULAR: &'static str = "lead status";
    const PLURAL: &'static str = "lead statuses";
    const ENDPOINTS: EndpointSet = EndpointSet::new("/api/crm/settings/lead-statuses");
    const PAGE_CATEGORY: &'static str = PAGE_CAT_SETTINGS;

    fn record_id(record: &LeadStatus) -> String {
        record.id.to_string()
    }

    fn record_label(record: &LeadStatus) -> String {
        record.name.clone()
    }

    fn columns() -> Vec<ColumnDef<LeadStatus>> {
        vec![
            ColumnDef::new("position", "#", |s: &LeadStatus| s.position.to_string())
                .sortable()
                .right(),
            ColumnDef::new("name", "Name", |s: &LeadStatus| s.name.clone()).sortable(),
            ColumnDef::new("color", "Color", |s: &LeadStatus| s.color.clone()),
            ColumnDef::new("is_default", "Default", |s: &LeadStatus| {
                let mark = if s.is_default { "Yes" } else { "" };
                mark.to_string()
            }),
        ]
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("position", SortDirection::Asc))
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text).required(),
            FormField::new("color", "Color", FieldKind::Color).required(),
            FormField::new("position", "Position", FieldKind::Number),
            FormField::new("is_default", "Default for new leads", FieldKind::Checkbox),
        ]
    }

    fn form_defaults() -> DraftRecord {
        DraftRecord::from_pairs([("color", "#3B82F6"), ("position", "0"), ("is_default", "false")])
    }

    fn project(record: &LeadStatus) -> DraftRecord {
        DraftRecord::from_pairs([
            ("name", record.name.clone()),
            ("color", record.color.clone()),
            ("position", record.position.to_string()),
            ("is_default", record.is_default.to_string()),
        ])
    }

    fn rules(_mode: FormMode) -> Vec<Rule> {
        vec![
            Rule::required("name", "Name"),
            Rule::max_length("name", "Name", 50),
            Rule::required("color", "Color"),
            Rule::ColorToken {
                field: "color",
                label: "Color",
            },
            Rule::NumberRange {
                field: "position",
                label: "Position",
                min: 0.0,
                max: 999.0,
            },
        ]
    }

    fn detail_rows(record: &LeadStatus) -> Vec<(&'static str, String)> {
        vec![
            ("Name", record.name.clone()),
            ("Color", record.color.clone()),
            ("Position", record.position.to_string()),
            ("Default", if record.is_default { "Yes" } else { "No" }.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::form::{payload_from_draft, FormController};
    use serde_json::json;

    #[test]
    fn test_color_token_and_payload() {
        let mut form = FormController::<LeadStatusEntity>::open_create();
        form.set_field("name", "Qualified");
        form.set_field("color", "blue");
        assert_eq!(
            form.validate().get("color"),
            Some("Color must be a hex color like #1A2B3C")
        );

        form.set_field("color", "#22c55e");
        form.set_field("is_default", "true");
        assert!(form.validate().is_empty());

        let body = payload_from_draft(&form.fields(), form.draft(), FormMode::Create);
        assert_eq!(
            body,
            json!({ "name": "Qualified", "color": "#22c55e", "position": 0, "is_default": true })
        );
    }
}
