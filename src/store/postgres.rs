use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{MoodStore, StoreResult};
use crate::models::metrics::UserMetrics;
use crate::models::mood_entry::{AssessmentResponse, MoodEntry, NewMoodEntry};
use crate::models::question::AssessmentQuestion;

#[derive(Clone)]
pub struct PgMoodStore {
    db: PgPool,
}

impl PgMoodStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromRow)]
struct MoodEntryRow {
    id: Uuid,
    user_id: Uuid,
    emotion: String,
    mood_score: f64,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    assessment_data: Json<Vec<AssessmentResponse>>,
}

impl From<MoodEntryRow> for MoodEntry {
    fn from(row: MoodEntryRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            emotion: row.emotion,
            mood_score: row.mood_score,
            notes: row.notes,
            created_at: row.created_at,
            assessment_data: row.assessment_data.0,
        }
    }
}

#[async_trait]
impl MoodStore for PgMoodStore {
    async fn insert_mood_entry(&self, entry: NewMoodEntry) -> StoreResult<MoodEntry> {
        let row = sqlx::query_as::<_, MoodEntryRow>(
            r#"
            INSERT INTO mood_entries (id, user_id, emotion, mood_score, notes, assessment_data)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.user_id)
        .bind(&entry.emotion)
        .bind(entry.mood_score)
        .bind(&entry.notes)
        .bind(Json(&entry.assessment_data))
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn query_mood_entries(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> StoreResult<Vec<MoodEntry>> {
        let rows = sqlx::query_as::<_, MoodEntryRow>(
            r#"
            SELECT * FROM mood_entries
            WHERE user_id = $1 AND created_at >= $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(MoodEntry::from).collect())
    }

    async fn upsert_user_metrics(&self, user_id: Uuid, metrics: &UserMetrics) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_assessment_metrics (
                user_id, stress_level, consistency, mood_trend, total_entries,
                latest_mood_score, latest_emotion, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                stress_level = EXCLUDED.stress_level,
                consistency = EXCLUDED.consistency,
                mood_trend = EXCLUDED.mood_trend,
                total_entries = EXCLUDED.total_entries,
                latest_mood_score = EXCLUDED.latest_mood_score,
                latest_emotion = EXCLUDED.latest_emotion,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(metrics.stress_level)
        .bind(metrics.consistency)
        .bind(metrics.mood_trend)
        .bind(metrics.total_entries)
        .bind(metrics.latest_mood_score)
        .bind(&metrics.latest_emotion)
        .bind(metrics.updated_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn user_metrics_snapshot(&self, user_id: Uuid) -> StoreResult<Option<UserMetrics>> {
        let metrics = sqlx::query_as::<_, UserMetrics>(
            "SELECT * FROM user_assessment_metrics WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(metrics)
    }

    async fn list_assessment_questions(&self) -> StoreResult<Vec<AssessmentQuestion>> {
        let questions = sqlx::query_as::<_, AssessmentQuestion>(
            "SELECT * FROM assessment_questions ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(questions)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
