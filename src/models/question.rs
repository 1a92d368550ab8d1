use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AssessmentQuestion {
    pub id: i32,
    #[sqlx(rename = "question_text")]
    pub text: String,
    pub question_type: String,
}
