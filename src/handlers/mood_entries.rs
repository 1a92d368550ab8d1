use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::config::MAX_WINDOW_DAYS;
use crate::error::{AppError, AppResult};
use crate::models::mood_entry::{CreateMoodEntryRequest, MoodEntry, MoodEntryQuery};
use crate::AppState;

pub async fn create_mood_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateMoodEntryRequest>,
) -> AppResult<(StatusCode, Json<MoodEntry>)> {
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let entry = state
        .mood
        .add_mood_entry(auth_user.id, body)
        .await
        .ok_or_else(|| AppError::Unavailable("Mood entry could not be saved".into()))?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_mood_entries(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodEntryQuery>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let days = window_days(query.days, state.config.entries_default_days)?;
    Ok(Json(state.mood.user_mood_entries(auth_user.id, days).await))
}

/// Lookback window from a `days` query parameter.
pub fn window_days(requested: Option<i64>, default: i64) -> AppResult<i64> {
    match requested {
        None => Ok(default),
        Some(days) if (1..=MAX_WINDOW_DAYS).contains(&days) => Ok(days),
        Some(_) => Err(AppError::Validation(format!(
            "days must be between 1 and {MAX_WINDOW_DAYS}"
        ))),
    }
}
