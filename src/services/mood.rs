use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::metrics::{UserMetrics, WeeklyMoodPoint};
use crate::models::mood_entry::{CreateMoodEntryRequest, MoodEntry, NewMoodEntry};
use crate::models::question::AssessmentQuestion;
use crate::services::mood_calc;
use crate::services::refresh_lock::RefreshLocks;
use crate::store::MoodStore;

/// Entry point for everything the dashboard asks of the mood journal.
///
/// Store failures are logged here and come back as `None` or an empty list;
/// callers treat that as "unavailable". Nothing is retried.
#[derive(Clone)]
pub struct MoodService {
    store: Arc<dyn MoodStore>,
    refresh_locks: RefreshLocks,
    metrics_window_days: i64,
}

impl MoodService {
    pub fn new(store: Arc<dyn MoodStore>, metrics_window_days: i64) -> Self {
        Self {
            store,
            refresh_locks: RefreshLocks::new(),
            metrics_window_days,
        }
    }

    /// Stores a new entry and then recomputes the user's metrics. The refresh
    /// starts only after the insert has completed.
    pub async fn add_mood_entry(
        &self,
        user_id: Uuid,
        request: CreateMoodEntryRequest,
    ) -> Option<MoodEntry> {
        let assessment_data = request.assessment_data.unwrap_or_default();
        let mood_score = match request.mood_score {
            Some(score) => mood_calc::clamp_score(score),
            None => mood_calc::score_new_entry(&request.emotion, &assessment_data),
        };

        let new_entry = NewMoodEntry {
            user_id,
            emotion: request.emotion,
            mood_score,
            notes: request.notes,
            assessment_data,
        };

        let entry = match self.store.insert_mood_entry(new_entry).await {
            Ok(entry) => entry,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to add mood entry");
                return None;
            }
        };

        tracing::info!(
            user_id = %user_id,
            entry_id = %entry.id,
            mood_score = entry.mood_score,
            "Mood entry added"
        );

        self.refresh_user_metrics(user_id).await;

        Some(entry)
    }

    /// Entries from the last `days` days, newest first.
    pub async fn user_mood_entries(&self, user_id: Uuid, days: i64) -> Vec<MoodEntry> {
        let since = Utc::now() - Duration::days(days);
        match self.store.query_mood_entries(user_id, since).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to fetch mood entries");
                Vec::new()
            }
        }
    }

    pub async fn refresh_user_metrics(&self, user_id: Uuid) -> Option<UserMetrics> {
        let guard = self.refresh_locks.acquire(user_id).await;
        let metrics = self.recompute_metrics(user_id).await;
        drop(guard);
        self.refresh_locks.prune().await;
        metrics
    }

    async fn recompute_metrics(&self, user_id: Uuid) -> Option<UserMetrics> {
        let since = Utc::now() - Duration::days(self.metrics_window_days);
        let entries = match self.store.query_mood_entries(user_id, since).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to fetch entries for metrics");
                return None;
            }
        };

        let now = Utc::now();

        if entries.is_empty() {
            let metrics = UserMetrics::empty(now);
            if let Err(e) = self.store.upsert_user_metrics(user_id, &metrics).await {
                tracing::error!(user_id = %user_id, error = %e, "Failed to reset user metrics");
            }
            return Some(metrics);
        }

        let metrics = summarize_entries(&entries, now);

        match self.store.upsert_user_metrics(user_id, &metrics).await {
            Ok(()) => {
                tracing::debug!(
                    user_id = %user_id,
                    total_entries = metrics.total_entries,
                    stress_level = metrics.stress_level,
                    consistency = metrics.consistency,
                    mood_trend = ?metrics.mood_trend,
                    "User metrics refreshed"
                );
                Some(metrics)
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to update user metrics");
                None
            }
        }
    }

    /// Last stored snapshot, without recomputing.
    pub async fn user_metrics(&self, user_id: Uuid) -> Option<UserMetrics> {
        match self.store.user_metrics_snapshot(user_id).await {
            Ok(Some(metrics)) => Some(metrics),
            Ok(None) => {
                tracing::debug!(user_id = %user_id, "No metrics snapshot yet");
                None
            }
            Err(e) => {
                tracing::error!(user_id = %user_id, error = %e, "Failed to fetch user metrics");
                None
            }
        }
    }

    pub async fn assessment_questions(&self) -> Vec<AssessmentQuestion> {
        match self.store.list_assessment_questions().await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch assessment questions");
                Vec::new()
            }
        }
    }

    pub async fn mood_trends(&self, user_id: Uuid, days: i64) -> Vec<WeeklyMoodPoint> {
        let entries = self.user_mood_entries(user_id, days).await;
        mood_calc::weekly_breakdown(&entries)
    }

    pub async fn ping(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

/// Full metrics snapshot for a non-empty, newest-first entry list.
fn summarize_entries(entries: &[MoodEntry], now: DateTime<Utc>) -> UserMetrics {
    let stress = mood_calc::stress_level(entries.iter().flat_map(|e| &e.assessment_data));
    let consistency = mood_calc::consistency_at(entries, now);
    let trend = mood_calc::mood_trend(entries);
    let latest = entries.first();

    if stress.is_no_data() || consistency.is_no_data() || trend.is_no_data() {
        tracing::debug!(
            entries = entries.len(),
            stress_data = !stress.is_no_data(),
            consistency_data = !consistency.is_no_data(),
            trend_data = !trend.is_no_data(),
            "Not enough data for every metric, using defaults"
        );
    }

    UserMetrics {
        stress_level: stress.or_default(),
        consistency: consistency.or_default(),
        mood_trend: trend.or_default(),
        total_entries: entries.len() as i64,
        latest_mood_score: latest.map(|e| e.mood_score),
        latest_emotion: latest.map(|e| e.emotion.clone()),
        updated_at: now,
    }
}
