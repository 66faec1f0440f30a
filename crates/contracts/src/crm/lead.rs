use serde::{Deserialize, Serialize};

use crate::shared::form::RecordId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    /// Status key, one of the configured lead statuses
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub source: Option<LeadSourceRef>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSourceRef {
    pub id: RecordId,
    pub name: String,
}
