use crate::shared::collection::api::EndpointSet;
use crate::shared::collection::entity::{CollectionEntity, FilterDef, TransitionDef};
use crate::shared::collection::form::{FieldKind, FormField};
use crate::shared::collection::table::ColumnDef;
use crate::shared::components::table::format_number_int;
use crate::shared::date_utils::{format_date_opt, input_date};
use contracts::hr::job_application::{ApplicationStatus, JobApplication};
use contracts::shared::form::{DraftRecord, FormMode};
use contracts::shared::list::SortDirection;
use contracts::shared::validation::Rule;

pub struct JobApplicationEntity;

fn is_open(status: &str) -> bool {
    status == ApplicationStatus::New.as_str() || status == ApplicationStatus::Shortlisted.as_str()
}

const SHORTLIST: TransitionDef = TransitionDef {
    action: "shortlist",
    label: "Shortlist",
    confirm_title: "Shortlist candidate",
    confirm_message: "Move this application to the shortlist?",
    success_message: "Candidate shortlisted",
    failure_message: "Could not shortlist candidate",
    applies_to: |status| status == ApplicationStatus::New.as_str(),
};

const REJECT: TransitionDef = TransitionDef {
    action: "reject",
    label: "Reject",
    confirm_title: "Reject application",
    confirm_message: "Reject this application? The candidate will be notified.",
    success_message: "Application rejected",
    failure_message: "Could not reject application",
    applies_to: is_open,
};

fn status_tone(application: &JobApplication) -> &'static str {
    match application.status {
        ApplicationStatus::Shortlisted => "warning",
        ApplicationStatus::Hired => "success",
        ApplicationStatus::Rejected => "danger",
        _ => "informative",
    }
}

fn job_title(application: &JobApplication) -> String {
    application
        .job
        .as_ref()
        .map(|j| j.title.clone())
        .unwrap_or_else(|| "—".to_string())
}

fn salary(application: &JobApplication) -> String {
    application
        .expected_salary
        .map(format_number_int)
        .unwrap_or_else(|| "—".to_string())
}

impl CollectionEntity for JobApplicationEntity {
    type Record = JobApplication;

    const PAGE_ID: &'static str = "h103_job_application";
    const TITLE: &'static str = "Job applications";
    const SINGULAR: &'static str = "job application";
    const PLURAL: &'static str = "job applications";
    const ENDPOINTS: EndpointSet = EndpointSet::new("/api/hr/job-applications");

    fn record_id(record: &JobApplication) -> String {
        record.id.to_string()
    }

    fn record_label(record: &JobApplication) -> String {
        record.candidate_name.clone()
    }

    fn record_status(record: &JobApplication) -> String {
        record.status.as_str().to_string()
    }

    fn columns() -> Vec<ColumnDef<JobApplication>> {
        vec![
            ColumnDef::new("candidate_name", "Candidate", |a: &JobApplication| {
                a.candidate_name.clone()
            })
            .sortable(),
            ColumnDef::new("job", "Job", job_title),
            ColumnDef::new("expected_salary", "Expected salary", salary)
                .sortable()
                .right(),
            ColumnDef::new("applied_on", "Applied", |a: &JobApplication| {
                format_date_opt(a.applied_on.as_deref())
            })
            .sortable(),
            ColumnDef::new("status", "Status", |a: &JobApplication| a.status.label().to_string())
                .badge(status_tone),
        ]
    }

    fn filters() -> Vec<FilterDef> {
        vec![
            FilterDef::select(
                "status",
                "Status",
                ApplicationStatus::ALL
                    .iter()
                    .map(|s| (s.as_str(), s.label()))
                    .collect(),
            ),
            FilterDef::text("job_id", "Job id"),
        ]
    }

    fn default_sort() -> Option<(&'static str, SortDirection)> {
        Some(("applied_on", SortDirection::Desc))
    }

    fn form_fields() -> Vec<FormField> {
        vec![
            FormField::new("job_id", "Job id", FieldKind::Number)
                .required()
                .create_only(),
            FormField::new("candidate_name", "Candidate name", FieldKind::Text).required(),
            FormField::new("email", "Email", FieldKind::Email),
            FormField::new("expected_salary", "Expected salary", FieldKind::Number),
            FormField::new("applied_on", "Applied on", FieldKind::Date),
        ]
    }

    fn form_defaults() -> DraftRecord {
        DraftRecord::new()
    }

    fn project(record: &JobApplication) -> DraftRecord {
        DraftRecord::from_pairs([
            (
                "job_id",
                record.job.as_ref().map(|j| j.id.to_string()).unwrap_or_default(),
            ),
            ("candidate_name", record.candidate_name.clone()),
            ("email", record.email.clone().unwrap_or_default()),
            (
                "expected_salary",
                record.expected_salary.map(|s| s.to_string()).unwrap_or_default(),
            ),
            (
                "applied_on",
                record.applied_on.as_deref().map(input_date).unwrap_or_default(),
            ),
        ])
    }

    fn rules(_mode: FormMode) -> Vec<Rule> {
        vec![
            // the posting cannot be changed once the application exists
            Rule::RequiredOnCreate {
                field: "job_id",
                label: "Job",
            },
            Rule::required("candidate_name", "Candidate name"),
            Rule::max_length("candidate_name", "Candidate name", 120),
            Rule::NumberRange {
                field: "expected_salary",
                label: "Expected salary",
                min: 0.0,
                max: 10_000_000.0,
            },
        ]
    }

    fn transitions() -> Vec<TransitionDef> {
        vec![SHORTLIST, REJECT]
    }

    fn detail_rows(record: &JobApplication) -> Vec<(&'static str, String)> {
        vec![
            ("Candidate", record.candidate_name.clone()),
            ("Job", job_title(record)),
            ("Email", record.email.clone().unwrap_or_else(|| "—".to_string())),
            ("Expected salary", salary(record)),
            ("Applied", format_date_opt(record.applied_on.as_deref())),
            ("Status", record.status.label().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::collection::form::{payload_from_draft, FormController};
    use serde_json::json;

    type Form = FormController<JobApplicationEntity>;

    fn application() -> JobApplication {
        serde_json::from_value(json!({
            "id": 3,
            "candidate_name": "Alex Kim",
            "expected_salary": 90000,
            "status": "new",
            "job": { "id": 5, "title": "Backend engineer" }
        }))
        .unwrap()
    }

    #[test]
    fn test_job_required_only_on_create() {
        let mut create = Form::open_create();
        create.set_field("candidate_name", "Alex Kim");
        assert_eq!(create.validate().get("job_id"), Some("Job is required"));

        let mut edit = Form::open_edit(&application());
        edit.set_field("job_id", "");
        assert!(edit.validate().is_empty());
    }

    #[test]
    fn test_job_not_sent_on_edit() {
        let form = Form::open_edit(&application());
        assert!(form.fields().iter().all(|f| f.name != "job_id"));

        let body = payload_from_draft(&form.fields(), form.draft(), FormMode::Edit);
        assert!(body.get("job_id").is_none());
        assert_eq!(body["expected_salary"], json!(90000));
    }

    #[test]
    fn test_salary_range() {
        let mut form = Form::open_edit(&application());
        form.set_field("expected_salary", "-1");
        assert_eq!(
            form.validate().get("expected_salary"),
            Some("Expected salary must be between 0 and 10000000")
        );
    }

    #[test]
    fn test_reject_offered_until_decided() {
        assert!((REJECT.applies_to)("new"));
        assert!((REJECT.applies_to)("shortlisted"));
        assert!(!(REJECT.applies_to)("hired"));
        assert!(!(SHORTLIST.applies_to)("shortlisted"));
    }
}
