use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{MoodStore, StoreError, StoreResult};
use crate::models::metrics::UserMetrics;
use crate::models::mood_entry::{MoodEntry, NewMoodEntry};
use crate::models::question::AssessmentQuestion;

/// In-memory store for tests. Each operation can be switched to fail.
#[derive(Default)]
pub struct MemoryMoodStore {
    entries: Mutex<Vec<MoodEntry>>,
    metrics: Mutex<HashMap<Uuid, UserMetrics>>,
    questions: Vec<AssessmentQuestion>,
    pub fail_insert: AtomicBool,
    pub fail_query: AtomicBool,
    pub fail_upsert: AtomicBool,
    pub fail_reads: AtomicBool,
    upserts: AtomicUsize,
}

impl MemoryMoodStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: Vec<AssessmentQuestion>) -> Self {
        Self {
            questions,
            ..Self::default()
        }
    }

    /// Seeds an entry with an explicit timestamp.
    pub async fn push_entry(&self, entry: MoodEntry) {
        self.entries.lock().await.push(entry);
    }

    pub async fn stored_metrics(&self, user_id: Uuid) -> Option<UserMetrics> {
        self.metrics.lock().await.get(&user_id).cloned()
    }

    pub fn upsert_count(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }

    fn check(flag: &AtomicBool, op: &str) -> StoreResult<()> {
        if flag.load(Ordering::SeqCst) {
            tracing::debug!(op, "Simulated store failure");
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl MoodStore for MemoryMoodStore {
    async fn insert_mood_entry(&self, entry: NewMoodEntry) -> StoreResult<MoodEntry> {
        Self::check(&self.fail_insert, "insert")?;
        let stored = MoodEntry {
            id: Uuid::new_v4(),
            user_id: entry.user_id,
            emotion: entry.emotion,
            mood_score: entry.mood_score,
            notes: entry.notes,
            created_at: Utc::now(),
            assessment_data: entry.assessment_data,
        };
        self.entries.lock().await.push(stored.clone());
        Ok(stored)
    }

    async fn query_mood_entries(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<MoodEntry>> {
        Self::check(&self.fail_query, "query")?;
        let mut found: Vec<MoodEntry> = self
            .entries
            .lock()
            .await
            .iter()
            .filter(|e| e.user_id == user_id && e.created_at >= since)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn upsert_user_metrics(&self, user_id: Uuid, metrics: &UserMetrics) -> StoreResult<()> {
        Self::check(&self.fail_upsert, "upsert")?;
        self.metrics.lock().await.insert(user_id, metrics.clone());
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn user_metrics_snapshot(&self, user_id: Uuid) -> StoreResult<Option<UserMetrics>> {
        Self::check(&self.fail_reads, "snapshot")?;
        Ok(self.metrics.lock().await.get(&user_id).cloned())
    }

    async fn list_assessment_questions(&self) -> StoreResult<Vec<AssessmentQuestion>> {
        Self::check(&self.fail_reads, "questions")?;
        let mut questions = self.questions.clone();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }

    async fn ping(&self) -> StoreResult<()> {
        Self::check(&self.fail_reads, "ping")
    }
}
