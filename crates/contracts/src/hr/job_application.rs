use serde::{Deserialize, Serialize};

use crate::shared::form::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobApplication {
    pub id: RecordId,
    pub candidate_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub expected_salary: Option<f64>,
    #[serde(default)]
    pub applied_on: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    /// The posting the candidate applied to; fixed once the application exists
    #[serde(default)]
    pub job: Option<JobRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRef {
    pub id: RecordId,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    New,
    Shortlisted,
    Rejected,
    Hired,
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::New,
        ApplicationStatus::Shortlisted,
        ApplicationStatus::Rejected,
        ApplicationStatus::Hired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::New => "new",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
            ApplicationStatus::Hired => "hired",
            ApplicationStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::New => "New",
            ApplicationStatus::Shortlisted => "Shortlisted",
            ApplicationStatus::Rejected => "Rejected",
            ApplicationStatus::Hired => "Hired",
            ApplicationStatus::Unknown => "Unknown",
        }
    }
}
