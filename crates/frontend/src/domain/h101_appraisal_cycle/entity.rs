use crate::shared::collection::api::EndpointSet;
use crate::shared::collection::entity::{CollectionEntity, FilterDef, TransitionDef};
use crate::shared::collection::form::{FieldKind, FormField};
use crate::shared::collection::table::ColumnDef;
use crate::shared::date_utils::{format_date, input_date};
use contracts::hr::appraisal_cycle::{AppraisalCycle, CycleStatus};
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::SortDirection;
use contracts::shared::validation::Rule;

pub struct AppraisalCycleEntity;

const ACTIVATE: TransitionDef = TransitionDef {
    action: "activate",
    label: "Activate",
    confirm_title: "Activate cycle",
    confirm_message: "Start this appraisal cycle? Employees will be able to submit reviews.",
    success_message: "Appraisal cycle activated",
    failure_message: "Could not activate appraisal cycle",
    applies_to: |status| status == CycleStatus::Draft.as_str(),
};

const CLOSE: TransitionDef = TransitionDef {
    action: "close",
    label: "Close",
    confirm_title: "Close cycle",
    confirm_message: "Close this appraisal cycle? Reviews can no longer be submitted.",
    success_message: "Appraisal cycle closed",
    failure_message: "Could not close appraisal cycle",
    applies_to: |status| status == CycleStatus::Active.as_str(),
};

fn status_tone(cycle: &AppraisalCycle) -> &'static str {
    match cycle.status {
        CycleStatus::Active => "success",
        CycleStatus::Closed => "subtle",
        _ => "informative",
    }
}

impl CollectionEntity for AppraisalCycleEntity {
    type Record = AppraisalCycle;

    const PAGE_ID: &'static str = "h101_appraisal_cycle";
    const TITLE: &'static str = "Appraisal cycles";
    const SINGULAR: &'static str = "appraisal cycle";
    const PLURAL: &'static str = "appraisal cycles";
    const ENDPOINTS: EndpointSet = EndpointSet::new("/api/hr/appraisal-cycles");

    fn record_id(record: &AppraisalCycle) -> String {
        record.id.to_string()
    }

    fn record_label(record: &AppraisalCycle) -> String {
        record.name.clone()
    }

    fn record_status(record: &AppraisalCycle) -> String {
        record.status.as_str().to_string()
    }

    fn columns() -> Vec<ColumnDef<AppraisalCycle>> {
        vec![
            ColumnDef::new("name", "Name", |c: &AppraisalCycle| c.name.clone()).sortable(),
            ColumnDef::new("cycle_start", "Start", |c: &AppraisalCycle| format_date(&c.cycle_start))
                .sortable(),
            ColumnDef::new("cycle_end", "End", |c: &AppraisalCycle| format_date(&c.cycle_end))
                .sortable(),
            ColumnDef::new("status", "Status", |c: &AppraisalCycle| c.status.label().to_string())
                .badge(status_tone),
        ]
    }

    fn filters() -> Vec<FilterDef> {
        vec![FilterDef::select(
            "status",
            "Status",
            CycleStatus::ALL.iter().map(|s| (s.as_str(), s.label())).collect(),
        )]
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("cycle_start", SortDirection::Desc))
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("name", "Name", FieldKind::Text)
                .required()
                .placeholder("e.g. H1 2026 performance review"),
            FormField::new("cycle_start", "Start date", FieldKind::Date).required(),
            FormField::new("cycle_end", "End date", FieldKind::Date).required(),
            FormField::new("description", "Description", FieldKind::TextArea),
        ]
    }

    fn form_defaults() -> DraftRecord {
        DraftRecord::new()
    }

    fn project(record: &AppraisalCycle) -> DraftRecord {
        DraftRecord::from_pairs([
            ("name", record.name.clone()),
            ("cycle_start", input_date(&record.cycle_start)),
            ("cycle_end", input_date(&record.cycle_end)),
            ("description", record.description.clone().unwrap_or_default()),
        ])
    }

    fn rules(_mode: FormMode) -> Vec<Rule> {
        vec![
            Rule::required("name", "Name"),
            Rule::max_length("name", "Name", 100),
            Rule::required("cycle_start", "Start date"),
            Rule::required("cycle_end", "End date"),
            Rule::DateNotBefore {
                start: "cycle_start",
                end: "cycle_end",
            },
            Rule::max_length("description", "Description", 500),
        ]
    }

    fn transitions() -> Vec<TransitionDef> {
        vec![ACTIVATE, CLOSE]
    }

    fn detail_rows(record: &AppraisalCycle) -> Vec<(&'static str, String)> {
        vec![
            ("Name", record.name.clone()),
            ("Start", format_date(&record.cycle_start)),
            ("End", format_date(&record.cycle_end)),
            ("Status", record.status.label().to_string()),
            ("Description", record.description.clone().unwrap_or_else(|| "—".to_string())),
        ]
    }
}
