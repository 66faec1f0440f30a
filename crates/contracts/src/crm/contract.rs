use serde::{Deserialize, Serialize};

use crate::shared::form::RecordId;

/// Договор с клиентом
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: RecordId,
    pub subject: String,
    #[serde(default)]
    pub amount: Option<f64>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub status: ContractStatus,
    #[serde(default)]
    pub lead: Option<LeadRef>,
    #[serde(default)]
    pub signed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRef {
    pub id: RecordId,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    #[default]
    Draft,
    Signed,
    Expired,
    #[serde(other)]
    Unknown,
}

impl ContractStatus {
    pub const ALL: [ContractStatus; 3] = [
        ContractStatus::Draft,
        ContractStatus::Signed,
        ContractStatus::Expired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Signed => "signed",
            ContractStatus::Expired => "expired",
            ContractStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "Draft",
            ContractStatus::Signed => "Signed",
            ContractStatus::Expired => "Expired",
            ContractStatus::Unknown => "Unknown",
        }
    }
}
