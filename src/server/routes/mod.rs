mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

use serde::Serialize;

use super::errors::ApiError;
use crate::db::{Category, Question};

pub type ApiResponse<T> = Result<T, ApiError>;

/// One page of questions together with everything the listing view needs.
#[derive(Serialize)]
pub struct QuestionsPage {
    success: bool,
    questions: Vec<Question>,
    categories: Vec<Category>,
    current_category: &'static str,
    total_questions: i64,
}

impl QuestionsPage {
    fn new(questions: Vec<Question>, categories: Vec<Category>, total_questions: i64) -> Self {
        Self {
            success: true,
            questions,
            categories,
            current_category: "null",
            total_questions,
        }
    }
}
