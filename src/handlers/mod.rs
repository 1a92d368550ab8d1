pub mod health;
pub mod metrics;
pub mod mood_entries;
pub mod questions;
