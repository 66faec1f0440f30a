use crate::shared::collection::api::EndpointSet;
use crate::shared::collection::entity::{CollectionEntity, FilterDef};
use crate::shared::collection::form::{FieldKind, FormField};
use crate::shared::collection::table::ColumnDef;
use crate::shared::date_utils::{format_date, input_date, input_time};
use contracts::hr::meeting::Meeting;
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::SortDirection;
use contracts::shared::validation::Rule;

/// Shortest meeting that can be booked
pub const MIN_MEETING_MINUTES: i64 = 15;

pub struct MeetingEntity;

fn time_range(meeting: &Meeting) -> String {
    format!(
        "{}–{}",
        input_time(&meeting.start_time),
        input_time(&meeting.end_time)
    )
}

impl CollectionEntity for MeetingEntity {
    type Record = Meeting;

    const PAGE_ID: &'static str = "h102_meeting";
    const TITLE: &'static str = "Meetings";
    const SINGULAR: &'static str = "meeting";
    const PLURAL: &'static str = "meetings";
    const ENDPOINTS: EndpointSet = EndpointSet::new("/api/hr/meetings");

    fn record_id(record: &Meeting) -> String {
        record.id.to_string()
    }

    fn record_label(record: &Meeting) -> String {
        record.title.clone()
    }

    fn columns() -> Vec<ColumnDef<Meeting>> {
        vec![
            ColumnDef::new("title", "Title", |m: &Meeting| m.title.clone()).sortable(),
            ColumnDef::new("meeting_date", "Date", |m: &Meeting| format_date(&m.meeting_date))
                .sortable(),
            ColumnDef::new("time", "Time", time_range),
            ColumnDef::new("employee", "Employee", |m: &Meeting| {
                m.employee
                    .as_ref()
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| "—".to_string())
            }),
        ]
    }

    fn filters() -> Vec<FilterDef> {
        vec![
            FilterDef::text("meeting_date", "Date (YYYY-MM-DD)"),
            FilterDef::text("employee_id", "Employee id"),
        ]
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("meeting_date", SortDirection::Desc))
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("title", "Title", FieldKind::Text).required(),
            FormField::new("meeting_date", "Date", FieldKind::Date).required(),
            FormField::new("start_time", "Start time", FieldKind::Time).required(),
            FormField::new("end_time", "End time", FieldKind::Time).required(),
            FormField::new("employee_id", "Employee id", FieldKind::Number),
            FormField::new("meeting_link", "Meeting link", FieldKind::Url)
                .placeholder("https://meet.example.com/..."),
            FormField::new("agenda", "Agenda", FieldKind::TextArea),
        ]
    }

    fn form_defaults() -> DraftRecord {
        DraftRecord::from_pairs([("start_time", "10:00"), ("end_time", "10:30")])
    }

    fn project(record: &Meeting) -> DraftRecord {
        DraftRecord::from_pairs([
            ("title", record.title.clone()),
            ("meeting_date", input_date(&record.meeting_date)),
            ("start_time", input_time(&record.start_time)),
            ("end_time", input_time(&record.end_time)),
            (
                "employee_id",
                record
                    .employee
                    .as_ref()
                    .map(|e| e.id.to_string())
                    .unwrap_or_default(),
            ),
            ("meeting_link", record.meeting_link.clone().unwrap_or_default()),
            ("agenda", record.agenda.clone().unwrap_or_default()),
        ])
    }

    fn rules(_mode: FormMode) -> Vec<Rule> {
        vec![
            Rule::required("title", "Title"),
            Rule::max_length("title", "Title", 150),
            Rule::required("meeting_date", "Date"),
            Rule::required("start_time", "Start time"),
            Rule::required("end_time", "End time"),
            Rule::TimeAfter {
                start: "start_time",
                end: "end_time",
                min_minutes: MIN_MEETING_MINUTES,
            },
            Rule::Url {
                field: "meeting_link",
                label: "Meeting link",
            },
        ]
    }

    fn detail_rows(record: &Meeting) -> Vec<(&'static str, String)> {
        vec![
            ("Title", record.title.clone()),
            ("Date", format_date(&record.meeting_date)),
            ("Time", time_range(record)),
            (
                "Employee",
                record
                    .employee
                    .as_ref()
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| "—".to_string()),
            ),
            ("Link", record.meeting_link.clone().unwrap_or_else(|| "—".to_string())),
            ("Agenda", record.agenda.clone().unwrap_or_else(|| "—".to_string())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::form::{payload_from_draft, FormController};
    use serde_json::json;

    type Form = FormController<MeetingEntity>;

    fn meeting() -> Meeting {
        serde_json::from_value(json!({
            "id": "m-1",
            "title": "1:1",
            "meeting_date": "2026-05-04T00:00:00Z",
            "start_time": "09:30:00",
            "end_time": "10:00:00",
            "employee": { "id": 12, "name": "Dana" }
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_flattens_employee_and_times() {
        let form = Form::open_edit(&meeting());
        assert_eq!(form.draft().get("employee_id"), "12");
        assert_eq!(form.draft().get("start_time"), "09:30");
        assert_eq!(form.draft().get("meeting_date"), "2026-05-04");

        let body = payload_from_draft(&form.fields(), form.draft(), FormMode::Edit);
        assert_eq!(body["employee_id"], json!(12));
        assert_eq!(body["meeting_link"], json!(null));
    }

    #[test]
    fn test_end_must_follow_start() {
        let mut form = Form::open_edit(&meeting());
        form.set_field("end_time", "09:30");
        assert_eq!(
            form.validate().get("end_time"),
            Some("End time must be after start time")
        );

        form.set_field("end_time", "09:40");
        assert_eq!(
            form.validate().get("end_time"),
            Some("Duration must be at least 15 minutes")
        );

        form.set_field("end_time", "09:45");
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_meeting_link_must_be_url() {
        let mut form = Form::open_edit(&meeting());
        form.set_field("meeting_link", "not a link");
        assert_eq!(
            form.validate().get("meeting_link"),
            Some("Meeting link must be a valid URL")
        );
    }
}
