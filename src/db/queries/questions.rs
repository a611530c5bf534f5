use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::{FromRow, SqliteConnection, SqlitePool};

use crate::pagination::Page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<i64>,
    pub difficulty: Option<i64>,
}

/// Fields of a question to be created. Nothing is required; absent fields are stored as NULL.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub category: Option<i64>,
}

/// Questions whose text contains `term`, ignoring case, ordered by id.
///
/// Case folding uses Unicode lowercasing, which SQLite's `LIKE` cannot do, so the
/// match and the paging happen here over the id-ordered table.
pub async fn search_questions(
    pool: &SqlitePool,
    term: &str,
    page: Page,
) -> sqlx::Result<Vec<Question>> {
    if page.window().is_none() {
        return Ok(Vec::new());
    }
    let needle = term.to_lowercase();
    let matches: Vec<Question> = get_all_questions(pool)
        .await?
        .into_iter()
        .filter(|question| {
            question
                .question
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .collect();
    Ok(page.slice(matches))
}

pub async fn get_questions_for_category(
    pool: &SqlitePool,
    category_id: i64,
    page: Page,
) -> sqlx::Result<Vec<Question>> {
    let Some((offset, limit)) = page.window() else {
        return Ok(Vec::new());
    };
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE category = ?1
        ORDER BY id LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(category_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn get_question_by_id(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Question>> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn count_questions(pool: &SqlitePool) -> sqlx::Result<i64> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM questions")
        .fetch_one(pool)
        .await
}

pub async fn create_question(pool: &SqlitePool, new_question: &NewQuestion) -> sqlx::Result<i64> {
    // dropping an uncommitted transaction rolls it back
    let mut tx = pool.begin().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category, difficulty) VALUES (?1, ?2, ?3, ?4)
        "#,
    )
    .bind(&new_question.question)
    .bind(&new_question.answer)
    .bind(new_question.category)
    .bind(new_question.difficulty)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    tx.commit().await?;
    Ok(id)
}

/// Returns `false` when no question has this id.
pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let mut tx = pool.begin().await?;

    let existing = sqlx::query_scalar::<_, i64>("SELECT id FROM questions WHERE id = ?1")
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    if existing.is_none() {
        tx.rollback().await?;
        return Ok(false);
    }

    sqlx::query("DELETE FROM questions WHERE id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    Ok(true)
}

/// Pick one question at random, optionally restricted to a category, skipping `exclude`.
pub async fn random_question(
    pool: &SqlitePool,
    category: Option<i64>,
    exclude: &[i64],
) -> sqlx::Result<Option<Question>> {
    // one JSON parameter instead of a bind per id, so long lists stay under SQLite's variable limit
    let exclude =
        serde_json::to_string(exclude).map_err(|err| sqlx::Error::Encode(Box::new(err)))?;
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category, difficulty FROM questions
        WHERE (?1 IS NULL OR category = ?1)
          AND id NOT IN (SELECT value FROM json_each(?2))
        ORDER BY RANDOM() LIMIT 1
        "#,
    )
    .bind(category)
    .bind(exclude)
    .fetch_optional(pool)
    .await
}

/// Insert or overwrite questions by id. Run it inside a transaction to make the import all or nothing.
pub async fn import_questions(
    conn: &mut SqliteConnection,
    questions: Vec<Question>,
) -> sqlx::Result<()> {
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category = excluded.category,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(&question.question)
        .bind(&question.answer)
        .bind(question.category)
        .bind(question.difficulty)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
