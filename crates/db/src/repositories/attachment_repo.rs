//! Repository for the `attachments` table. Only metadata is stored here;
//! file bytes live in external storage.

use qna_core::entity::EntityKind;
use qna_core::types::DbId;
use sqlx::PgPool;

use crate::models::attachment::{Attachment, CreateAttachment};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, attachable_type, attachable_id, file_name, file_path, created_at, updated_at";

pub struct AttachmentRepo;

impl AttachmentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttachment,
    ) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments (attachable_type, attachable_id, file_name, file_path)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(input.attachable_type.as_str())
            .bind(input.attachable_id)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachments WHERE id = $1");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Attachments of one question or answer, in upload order.
    pub async fn list_for(
        pool: &PgPool,
        kind: EntityKind,
        attachable_id: DbId,
    ) -> Result<Vec<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments
             WHERE attachable_type = $1 AND attachable_id = $2
             ORDER BY id"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(kind.as_str())
            .bind(attachable_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attachments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
