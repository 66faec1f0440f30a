use serde::{Deserialize, Serialize};

use crate::shared::form::RecordId;

/// Цикл оценки персонала
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalCycle {
    pub id: RecordId,
    pub name: String,
    /// ISO date or timestamp
    pub cycle_start: String,
    pub cycle_end: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: CycleStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleStatus {
    #[default]
    Draft,
    Active,
    Closed,
    #[serde(other)]
    Unknown,
}

impl CycleStatus {
    pub const ALL: [CycleStatus; 3] = [CycleStatus::Draft, CycleStatus::Active, CycleStatus::Closed];

    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Draft => "draft",
            CycleStatus::Active => "active",
            CycleStatus::Closed => "closed",
            CycleStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CycleStatus::Draft => "Draft",
            CycleStatus::Active => "Active",
            CycleStatus::Closed => "Closed",
            CycleStatus::Unknown => "Unknown",
        }
    }
}
