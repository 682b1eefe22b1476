//! Cleanup of polymorphic children (votes, comments, attachments).
//!
//! These tables reference their parent by `(type, id)` and carry no foreign
//! key, so deleting a question or answer must remove them explicitly.

use qna_core::entity::EntityKind;
use qna_core::types::DbId;
use sqlx::PgConnection;

/// Delete every vote, comment and attachment belonging to the given parents.
pub(crate) async fn delete_children(
    conn: &mut PgConnection,
    kind: EntityKind,
    ids: &[DbId],
) -> Result<(), sqlx::Error> {
    if ids.is_empty() {
        return Ok(());
    }

    sqlx::query("DELETE FROM votes WHERE votable_type = $1 AND votable_id = ANY($2)")
        .bind(kind.as_str())
        .bind(ids)
        .execute(&mut *conn)
        .await?;

    sqlx::query("DELETE FROM comments WHERE commentable_type = $1 AND commentable_id = ANY($2)")
        .bind(kind.as_str())
        .bind(ids)
        .execute(&mut *conn)
        .await?;

    sqlx::query(
        "DELETE FROM attachments WHERE attachable_type = $1 AND attachable_id = ANY($2)",
    )
    .bind(kind.as_str())
    .bind(ids)
    .execute(&mut *conn)
    .await?;

    Ok(())
}
