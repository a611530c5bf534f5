use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, count_questions, search_questions},
        },
        NewQuestion,
    },
    pagination::Page,
    server::{
        app::AppState,
        deserializers::{ApiJson, ApiPath, ApiQuery},
        errors::ApiError,
    },
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{ApiResponse, QuestionsPage};

#[derive(Deserialize)]
struct SearchQuery {
    #[serde(rename = "search-term", default)]
    search_term: String,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted: i64,
    total_questions: i64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(page): ApiQuery<Page>,
    ApiQuery(SearchQuery { search_term }): ApiQuery<SearchQuery>,
) -> ApiResponse<Json<QuestionsPage>> {
    let questions = search_questions(&pool, &search_term, page).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    // total is over all questions, not just the matches
    Ok(Json(QuestionsPage::new(
        questions,
        get_all_categories(&pool).await?,
        count_questions(&pool).await?,
    )))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(new_question): ApiJson<NewQuestion>,
) -> ApiResponse<Json<Created>> {
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::Unprocessable)?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, "Created question");

    Ok(Json(Created {
        success: true,
        created: id,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    let deleted = questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::Unprocessable)?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    QUESTIONS_DELETED.inc();
    tracing::info!(id, "Deleted question");

    let total_questions = count_questions(&pool)
        .await
        .map_err(ApiError::Unprocessable)?;
    Ok(Json(Deleted {
        success: true,
        deleted: id,
        total_questions,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
