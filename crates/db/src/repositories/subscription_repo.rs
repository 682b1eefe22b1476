//! Repository for the `subscriptions` table.

use qna_core::types::DbId;
use sqlx::PgPool;

use crate::models::subscription::Subscription;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, question_id, created_at, updated_at";

pub struct SubscriptionRepo;

impl SubscriptionRepo {
    /// Subscribe a user to a question. Subscribing twice is a no-op and
    /// returns the existing row.
    pub async fn subscribe(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
    ) -> Result<Subscription, sqlx::Error> {
        sqlx::query(
            "INSERT INTO subscriptions (user_id, question_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_subscriptions_user_question DO NOTHING",
        )
        .bind(user_id)
        .bind(question_id)
        .execute(pool)
        .await?;

        let query =
            format!("SELECT {COLUMNS} FROM subscriptions WHERE user_id = $1 AND question_id = $2");
        sqlx::query_as::<_, Subscription>(&query)
            .bind(user_id)
            .bind(question_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a subscription. Returns `true` if one existed.
    pub async fn unsubscribe(
        pool: &PgPool,
        user_id: DbId,
        question_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM subscriptions WHERE user_id = $1 AND question_id = $2")
                .bind(user_id)
                .bind(question_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Subscriptions of a question, oldest first.
    pub async fn list_by_question(
        pool: &PgPool,
        question_id: DbId,
    ) -> Result<Vec<Subscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM subscriptions WHERE question_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Subscription>(&query)
            .bind(question_id)
            .fetch_all(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, question_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM subscriptions WHERE user_id = $1 AND question_id = $2)",
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_one(pool)
        .await
    }
}
