//! Repository for the `questions` table.

use qna_core::entity::EntityKind;
use qna_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::question::{CreateQuestion, Question, UpdateQuestion};
use crate::repositories::polymorphic;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, body, created_at, updated_at";

/// Provides CRUD operations for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    /// Insert a new question and subscribe its author in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateQuestion) -> Result<Question, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO questions (user_id, title, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let question = sqlx::query_as::<_, Question>(&query)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO subscriptions (user_id, question_id) VALUES ($1, $2)")
            .bind(question.user_id)
            .bind(question.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(question)
    }

    /// Find a question by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List questions newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Total number of questions.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(pool)
            .await
    }

    /// Update a question. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuestion,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET
                title = COALESCE($2, title),
                body = COALESCE($3, body)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Delete a question together with its answers, subscriptions and every
    /// vote, comment and attachment on the question or its answers.
    ///
    /// Returns `true` if the question existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let answer_ids: Vec<DbId> =
            sqlx::query_scalar("SELECT id FROM answers WHERE question_id = $1")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        polymorphic::delete_children(&mut tx, EntityKind::Answer, &answer_ids).await?;
        polymorphic::delete_children(&mut tx, EntityKind::Question, &[id]).await?;

        // Answers and subscriptions go with the question via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            question_id = id,
            answers = answer_ids.len(),
            "Deleted question with children"
        );
        Ok(result.rows_affected() > 0)
    }

    /// Questions created at or after `since`, oldest first.
    pub async fn created_since(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<Question>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM questions
             WHERE created_at >= $1
             ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(since)
            .fetch_all(pool)
            .await
    }
}
