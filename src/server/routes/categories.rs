use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{count_questions, get_questions_for_category},
        },
        Category,
    },
    pagination::Page,
    server::{
        app::AppState,
        deserializers::{ApiPath, ApiQuery},
        errors::ApiError,
    },
};

use super::{ApiResponse, QuestionsPage};

#[derive(Serialize)]
struct CategoriesList {
    success: bool,
    categories: Vec<Category>,
    total_categories: usize,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesList>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesList {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

// no separate existence check: an unknown category simply has no questions
async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(category_id): ApiPath<i64>,
    ApiQuery(page): ApiQuery<Page>,
) -> ApiResponse<Json<QuestionsPage>> {
    let questions = get_questions_for_category(&pool, category_id, page).await?;
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(QuestionsPage::new(
        questions,
        get_all_categories(&pool).await?,
        count_questions(&pool).await?,
    )))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;
    use sqlx::SqlitePool;

    use crate::test_utils::{create_test_app, seed_categories, seed_questions};

    #[sqlx::test]
    #[test_log::test]
    async fn lists_categories_in_id_order(pool: SqlitePool) {
        seed_categories(&pool).await;
        let app = create_test_app(pool);

        let response = app.get("/categories").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["total_categories"], 6);
        assert_eq!(body["categories"][0]["id"], 1);
        assert_eq!(body["categories"][0]["type"], "Science");
        assert_eq!(body["categories"][5]["type"], "Sports");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn no_categories_is_404(pool: SqlitePool) {
        let app = create_test_app(pool);

        let response = app.get("/categories").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not found");
    }

    #[sqlx::test]
    #[test_log::test]
    async fn read_failures_are_500(pool: SqlitePool) {
        let app = create_test_app(pool.clone());
        pool.close().await;

        let response = app.get("/categories").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["error"], 500);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn questions_by_category(pool: SqlitePool) {
        seed_categories(&pool).await;
        seed_questions(&pool, 3, 1).await;
        let art = seed_questions(&pool, 12, 2).await;
        let app = create_test_app(pool);

        let response = app.get("/categories/2/questions").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["questions"].as_array().unwrap().len(), 10);
        assert_eq!(body["questions"][0]["id"], art[0]);
        assert_eq!(body["total_questions"], 15);
        assert_eq!(body["current_category"], "null");
        assert_eq!(body["categories"].as_array().unwrap().len(), 6);

        let response = app.get("/categories/2/questions?page=2").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["questions"].as_array().unwrap().len(), 2);
        assert!(body["questions"]
            .as_array()
            .unwrap()
            .iter()
            .all(|q| q["category"] == 2));
    }

    #[sqlx::test]
    #[test_log::test]
    async fn unknown_category_is_404(pool: SqlitePool) {
        seed_categories(&pool).await;
        seed_questions(&pool, 3, 1).await;
        let app = create_test_app(pool);

        app.get("/categories/-1/questions")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.get("/categories/1/questions?page=2")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        app.get("/categories/art/questions")
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
