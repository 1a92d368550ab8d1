use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::mood_entries::window_days;
use crate::models::metrics::{MoodTrendQuery, UserMetrics, WeeklyMoodPoint};
use crate::AppState;

pub async fn get_metrics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserMetrics>> {
    let metrics = state
        .mood
        .user_metrics(auth_user.id)
        .await
        .ok_or(AppError::NotFound("Metrics unavailable".into()))?;

    Ok(Json(metrics))
}

pub async fn refresh_metrics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserMetrics>> {
    let metrics = state
        .mood
        .refresh_user_metrics(auth_user.id)
        .await
        .ok_or_else(|| AppError::Unavailable("Metrics could not be refreshed".into()))?;

    Ok(Json(metrics))
}

pub async fn get_mood_trends(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<MoodTrendQuery>,
) -> AppResult<Json<Vec<WeeklyMoodPoint>>> {
    let days = window_days(query.days, state.config.trends_default_days)?;
    Ok(Json(state.mood.mood_trends(auth_user.id, days).await))
}
