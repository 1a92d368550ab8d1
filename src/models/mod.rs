pub mod metrics;
pub mod mood_entry;
pub mod question;
