pub mod announcements;
pub mod metrics;
pub mod timestamp;
