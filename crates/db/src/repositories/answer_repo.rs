//! Repository for the `answers` table.

use qna_core::entity::EntityKind;
use qna_core::promotion::{self, AnswerFlag, PromotionPlan};
use qna_core::types::DbId;
use sqlx::PgPool;

use crate::models::answer::{Answer, CreateAnswer};
use crate::repositories::polymorphic;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, question_id, user_id, body, best, created_at, updated_at";

/// Best answer first, then oldest first.
const DISPLAY_ORDER: &str = "best DESC, created_at ASC, id ASC";

/// Provides CRUD operations and best-answer promotion for answers.
pub struct AnswerRepo;

impl AnswerRepo {
    /// Insert a new answer, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAnswer) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "INSERT INTO answers (question_id, user_id, body)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(input.question_id)
            .bind(input.user_id)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find an answer by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an answer by ID, scoped to its question.
    pub async fn find_in_question(
        pool: &PgPool,
        question_id: DbId,
        id: DbId,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1 AND question_id = $2");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .bind(question_id)
            .fetch_optional(pool)
            .await
    }

    /// All answers of a question, best first.
    pub async fn list_by_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<Answer>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM answers WHERE question_id = $1 ORDER BY {DISPLAY_ORDER}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    /// Answers of several questions at once, for embedding in listings.
    pub async fn list_by_questions(
        pool: &PgPool,
        question_ids: &[DbId],
    ) -> Result<Vec<Answer>, sqlx::Error> {
        if question_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM answers
             WHERE question_id = ANY($1)
             ORDER BY question_id, {DISPLAY_ORDER}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_ids)
            .fetch_all(pool)
            .await
    }

    /// The current best answer of a question, if any.
    pub async fn find_best_for_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE question_id = $1 AND best");
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_id)
            .fetch_optional(pool)
            .await
    }

    /// Replace an answer's body.
    pub async fn update_body(
        pool: &PgPool,
        id: DbId,
        body: &str,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("UPDATE answers SET body = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .bind(body)
            .fetch_optional(pool)
            .await
    }

    /// Delete an answer with its votes, comments and attachments.
    ///
    /// Returns `true` if the answer existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        polymorphic::delete_children(&mut tx, EntityKind::Answer, &[id]).await?;

        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Toggle the best flag of an answer.
    ///
    /// Promoting an answer demotes any other best answer of the same
    /// question; switching the current best answer clears it. The question
    /// row is locked so concurrent switches on one question serialize, and
    /// demotions are written before the promotion so the partial unique
    /// index `uq_answers_best_per_question` never sees two best answers.
    ///
    /// Returns `None` if the answer does not exist.
    pub async fn switch_promotion(pool: &PgPool, id: DbId) -> Result<Option<Answer>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let question_id: Option<DbId> =
            sqlx::query_scalar("SELECT question_id FROM answers WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(question_id) = question_id else {
            return Ok(None);
        };

        sqlx::query("SELECT id FROM questions WHERE id = $1 FOR UPDATE")
            .bind(question_id)
            .execute(&mut *tx)
            .await?;

        let flags: Vec<AnswerFlag> = sqlx::query_as::<_, (DbId, bool)>(
            "SELECT id, best FROM answers WHERE question_id = $1",
        )
        .bind(question_id)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|(id, best)| AnswerFlag { id, best })
        .collect();

        // Deleted between the lookup and the lock.
        let Ok(plan) = promotion::plan(id, &flags) else {
            return Ok(None);
        };

        match &plan {
            PromotionPlan::Promote { target, demote } => {
                if !demote.is_empty() {
                    sqlx::query("UPDATE answers SET best = false WHERE id = ANY($1)")
                        .bind(demote)
                        .execute(&mut *tx)
                        .await?;
                }
                sqlx::query("UPDATE answers SET best = true WHERE id = $1")
                    .bind(target)
                    .execute(&mut *tx)
                    .await?;
            }
            PromotionPlan::Demote { target } => {
                sqlx::query("UPDATE answers SET best = false WHERE id = $1")
                    .bind(target)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1");
        let answer = sqlx::query_as::<_, Answer>(&query)
            .bind(plan.target())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            answer_id = answer.id,
            question_id,
            best = answer.best,
            "Switched answer promotion"
        );
        Ok(Some(answer))
    }
}
