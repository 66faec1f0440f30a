pub mod campaign;
pub mod contract;
pub mod lead;
pub mod lead_status;
