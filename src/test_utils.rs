//! Shared fixtures for database and HTTP tests.

use axum_test::TestServer;
use sqlx::SqlitePool;

use crate::db::queries::categories::{import_categories, Category};
use crate::db::queries::questions::{create_question, NewQuestion};
use crate::server::app::{build_router, AppState};

pub const CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

pub fn create_test_app(pool: SqlitePool) -> TestServer {
    TestServer::new(build_router(AppState::new(pool))).expect("Failed to create test server")
}

/// Categories 1 to 6, in the order of [`CATEGORIES`].
pub async fn seed_categories(pool: &SqlitePool) -> Vec<Category> {
    let categories: Vec<Category> = CATEGORIES
        .iter()
        .zip(1..)
        .map(|(kind, id)| Category {
            id,
            kind: kind.to_string(),
        })
        .collect();
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    import_categories(&mut conn, categories.clone())
        .await
        .expect("Failed to seed categories");
    categories
}

pub fn new_question(text: &str, category: i64) -> NewQuestion {
    NewQuestion {
        question: Some(text.to_owned()),
        answer: Some("answer".to_owned()),
        difficulty: Some(1),
        category: Some(category),
    }
}

/// Create `count` questions in `category`, returning their ids in creation order.
pub async fn seed_questions(pool: &SqlitePool, count: usize, category: i64) -> Vec<i64> {
    let mut ids = Vec::with_capacity(count);
    for n in 0..count {
        let question = new_question(&format!("Question {n} of category {category}?"), category);
        ids.push(
            create_question(pool, &question)
                .await
                .expect("Failed to seed question"),
        );
    }
    ids
}
