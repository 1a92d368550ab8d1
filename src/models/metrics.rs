use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "mood_trend", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
}

impl Default for MoodTrend {
    fn default() -> Self {
        Self::Stable
    }
}

/// Derived snapshot for one user, recomputed in full and overwritten on
/// every refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserMetrics {
    pub stress_level: f64,
    pub consistency: f64,
    pub mood_trend: MoodTrend,
    pub total_entries: i64,
    pub latest_mood_score: Option<f64>,
    pub latest_emotion: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserMetrics {
    /// Snapshot written when a user has no entries in the analysis window.
    pub fn empty(updated_at: DateTime<Utc>) -> Self {
        Self {
            stress_level: 0.0,
            consistency: 0.0,
            mood_trend: MoodTrend::Stable,
            total_entries: 0,
            latest_mood_score: None,
            latest_emotion: None,
            updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyMoodPoint {
    pub week: String,
    pub average_score: f64,
    pub entries_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct MoodTrendQuery {
    pub days: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_trend_serializes_lowercase() {
        assert_eq!(serde_json::to_value(MoodTrend::Improving).unwrap(), "improving");
        assert_eq!(serde_json::to_value(MoodTrend::default()).unwrap(), "stable");
    }

    #[test]
    fn test_empty_snapshot_fields() {
        let json = serde_json::to_value(UserMetrics::empty(Utc::now())).unwrap();
        assert_eq!(json["stress_level"], 0.0);
        assert_eq!(json["consistency"], 0.0);
        assert_eq!(json["mood_trend"], "stable");
        assert_eq!(json["total_entries"], 0);
        assert!(json["latest_emotion"].is_null());
    }
}
