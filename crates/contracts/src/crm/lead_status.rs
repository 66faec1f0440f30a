use serde::{Deserialize, Serialize};

use crate::shared::form::RecordId;

/// Lead pipeline stage, configured in CRM settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadStatus {
    pub id: RecordId,
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub is_default: bool,
}
