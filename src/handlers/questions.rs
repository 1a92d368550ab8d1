use axum::{extract::State, Json};

use crate::models::question::AssessmentQuestion;
use crate::AppState;

pub async fn list_assessment_questions(
    State(state): State<AppState>,
) -> Json<Vec<AssessmentQuestion>> {
    Json(state.mood.assessment_questions().await)
}
