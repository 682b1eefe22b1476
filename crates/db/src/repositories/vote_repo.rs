//! Repository for the `votes` table.

use qna_core::entity::EntityKind;
use qna_core::types::DbId;
use qna_core::votes::{self, Direction, VoteChange};
use sqlx::PgPool;

use crate::models::vote::Vote;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, votable_type, votable_id, value, created_at, updated_at";

pub struct VoteRepo;

impl VoteRepo {
    /// The vote a user holds on a votable, if any.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        kind: EntityKind,
        votable_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM votes
             WHERE user_id = $1 AND votable_type = $2 AND votable_id = $3"
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(user_id)
            .bind(kind.as_str())
            .bind(votable_id)
            .fetch_optional(pool)
            .await
    }

    /// Record a vote in `direction`, applying the cast / flip / retract rule
    /// against the user's existing vote. The existing row is locked for the
    /// duration of the transaction.
    pub async fn vote(
        pool: &PgPool,
        user_id: DbId,
        kind: EntityKind,
        votable_id: DbId,
        direction: Direction,
    ) -> Result<VoteChange, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing: Option<(DbId, i16)> = sqlx::query_as(
            "SELECT id, value FROM votes
             WHERE user_id = $1 AND votable_type = $2 AND votable_id = $3
             FOR UPDATE",
        )
        .bind(user_id)
        .bind(kind.as_str())
        .bind(votable_id)
        .fetch_optional(&mut *tx)
        .await?;

        let change = votes::decide(existing.map(|(_, value)| value), direction);

        match (change, existing) {
            (VoteChange::Cast(value), _) => {
                sqlx::query(
                    "INSERT INTO votes (user_id, votable_type, votable_id, value)
                     VALUES ($1, $2, $3, $4)",
                )
                .bind(user_id)
                .bind(kind.as_str())
                .bind(votable_id)
                .bind(value)
                .execute(&mut *tx)
                .await?;
            }
            (VoteChange::Flip(value), Some((id, _))) => {
                sqlx::query("UPDATE votes SET value = $2 WHERE id = $1")
                    .bind(id)
                    .bind(value)
                    .execute(&mut *tx)
                    .await?;
            }
            (VoteChange::Retract, Some((id, _))) => {
                sqlx::query("DELETE FROM votes WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            // decide() only flips or retracts an existing vote.
            (VoteChange::Flip(_) | VoteChange::Retract, None) => {}
        }

        tx.commit().await?;
        Ok(change)
    }

    /// Sum of all vote values on a votable.
    pub async fn rating(pool: &PgPool, kind: EntityKind, votable_id: DbId) -> Result<i64, sqlx::Error> {
        let values: Vec<i16> = sqlx::query_scalar(
            "SELECT value FROM votes WHERE votable_type = $1 AND votable_id = $2",
        )
        .bind(kind.as_str())
        .bind(votable_id)
        .fetch_all(pool)
        .await?;
        Ok(votes::tally(&values))
    }
}
