//! Wire-level contracts shared between the admin console and the REST service.
//!
//! - `shared`: list query/response envelopes, form drafts, field errors, validation rules
//! - `hr`: HR console records (appraisal cycles, meetings, job applications)
//! - `crm`: CRM console records (leads, contracts, campaigns, lead statuses)

pub mod crm;
pub mod hr;
pub mod shared;
