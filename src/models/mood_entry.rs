use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub emotion: String,
    pub mood_score: f64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assessment_data: Vec<AssessmentResponse>,
}

/// One answer within a mood check-in questionnaire. `score` is the raw
/// response, nominally on a 1-5 scale; it is stored as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub question_id: i32,
    pub question_type: String,
    pub score: f64,
}

/// Record handed to the store. `id` and `created_at` are assigned there.
#[derive(Debug, Clone)]
pub struct NewMoodEntry {
    pub user_id: Uuid,
    pub emotion: String,
    pub mood_score: f64,
    pub notes: Option<String>,
    pub assessment_data: Vec<AssessmentResponse>,
}

/// POST /api/mood-entries
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateMoodEntryRequest {
    #[validate(length(min = 1, max = 32, message = "Emotion must be 1-32 characters"))]
    pub emotion: String,

    /// Computed from the emotion and assessment answers when omitted.
    pub mood_score: Option<f64>,

    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,

    pub assessment_data: Option<Vec<AssessmentResponse>>,
}

#[derive(Debug, Deserialize)]
pub struct MoodEntryQuery {
    pub days: Option<i64>,
}
