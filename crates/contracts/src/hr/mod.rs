pub mod appraisal_cycle;
pub mod job_application;
pub mod meeting;
