pub mod entity;
pub mod ui;

pub use entity::CampaignEntity;
