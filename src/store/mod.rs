//! Data-access boundary for the mood service.
//!
//! The service only talks to a [`MoodStore`]; the Postgres implementation is
//! wired up in `main`, tests use the in-memory one.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::metrics::UserMetrics;
use crate::models::mood_entry::{MoodEntry, NewMoodEntry};
use crate::models::question::AssessmentQuestion;

pub mod postgres;

#[cfg(test)]
pub mod memory;

pub use postgres::PgMoodStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait MoodStore: Send + Sync {
    async fn insert_mood_entry(&self, entry: NewMoodEntry) -> StoreResult<MoodEntry>;

    /// Entries created at or after `since`, newest first.
    async fn query_mood_entries(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<MoodEntry>>;

    /// Overwrites any existing snapshot for the user.
    async fn upsert_user_metrics(&self, user_id: Uuid, metrics: &UserMetrics) -> StoreResult<()>;

    async fn user_metrics_snapshot(&self, user_id: Uuid) -> StoreResult<Option<UserMetrics>>;

    /// Ordered by id.
    async fn list_assessment_questions(&self) -> StoreResult<Vec<AssessmentQuestion>>;

    async fn ping(&self) -> StoreResult<()>;
}
