use serde::{Deserialize, Serialize};

use crate::shared::form::RecordId;

/// One-to-one / review meeting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: RecordId,
    pub title: String,
    /// ISO timestamp of the meeting day
    pub meeting_date: String,
    /// `HH:MM:SS`
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub agenda: Option<String>,
    #[serde(default)]
    pub employee: Option<EmployeeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: RecordId,
    pub name: String,
}
