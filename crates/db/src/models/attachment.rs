//! Attachment metadata model (polymorphic over questions and answers).

use qna_core::entity::EntityKind;
use qna_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attachments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub attachable_type: String,
    pub attachable_id: DbId,
    pub file_name: String,
    pub file_path: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new attachment.
#[derive(Debug)]
pub struct CreateAttachment {
    pub attachable_type: EntityKind,
    pub attachable_id: DbId,
    pub file_name: String,
    pub file_path: String,
}
