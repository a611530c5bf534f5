use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::random_question, Question},
    server::{
        app::AppState,
        deserializers::{deserialize_ids, ApiJson},
        errors::ApiError,
    },
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::ApiResponse;

/// Category id meaning "questions from every category".
const ALL_CATEGORIES: i64 = 0;

#[derive(Deserialize, Default)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Deserialize)]
struct QuizRequest {
    #[serde(default, deserialize_with = "deserialize_ids")]
    previous_questions: Vec<i64>,
    #[serde(default)]
    quiz_category: QuizCategory,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Question,
}

// category ids are not validated: an unknown one has no questions and ends up as 404
async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(request): ApiJson<QuizRequest>,
) -> ApiResponse<Json<QuizQuestion>> {
    let QuizRequest {
        previous_questions,
        quiz_category,
    } = request;
    tracing::debug!(
        category = quiz_category.id,
        kind = ?quiz_category.kind,
        previous = previous_questions.len(),
        "Picking quiz question"
    );

    let category = (quiz_category.id != ALL_CATEGORIES).then_some(quiz_category.id);
    let question = random_question(&pool, category, &previous_questions)
        .await?
        .ok_or(ApiError::NotFound)?;

    let label = category.map_or_else(|| "all".to_owned(), |id| id.to_string());
    QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quiz_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}
