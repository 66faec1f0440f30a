//! Entities shown as collection pages.
//!
//! `h1xx` HR console, `c2xx` CRM console.

pub mod c201_lead;
pub mod c202_contract;
pub mod c203_campaign;
pub mod c204_lead_status;
pub mod h101_appraisal_cycle;
pub mod h102_meeting;
pub mod h103_job_application;
