//! Handlers for attachment metadata on questions and answers.
//!
//! Only the owner of the question or answer may add or remove attachments.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use qna_core::entity::EntityKind;
use qna_core::error::CoreError;
use qna_core::forms::AttachmentForm;
use qna_core::types::DbId;
use qna_db::models::attachment::{Attachment, CreateAttachment};
use qna_db::repositories::AttachmentRepo;
use serde::Serialize;
use validator::Validate;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::extract::JsonForm;
use crate::handlers::{ensure_owner, owner_of};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Attachment as exposed by the API, with an absolute download URL.
#[derive(Debug, Serialize)]
pub struct AttachmentView {
    pub id: DbId,
    pub file_name: String,
    pub url: String,
}

impl AttachmentView {
    pub fn new(attachment: Attachment, config: &ServerConfig) -> Self {
        Self {
            id: attachment.id,
            url: config.attachment_url(&attachment.file_path),
            file_name: attachment.file_name,
        }
    }
}

/// All attachments of a question or answer as API views.
pub(crate) async fn views_for(
    state: &AppState,
    kind: EntityKind,
    id: DbId,
) -> AppResult<Vec<AttachmentView>> {
    Ok(AttachmentRepo::list_for(&state.pool, kind, id)
        .await?
        .into_iter()
        .map(|a| AttachmentView::new(a, &state.config))
        .collect())
}

async fn list(
    state: AppState,
    kind: EntityKind,
    id: DbId,
) -> AppResult<Json<DataResponse<Vec<AttachmentView>>>> {
    owner_of(&state.pool, kind, id).await?;
    Ok(Json(DataResponse {
        data: views_for(&state, kind, id).await?,
    }))
}

async fn create(
    state: AppState,
    user: AuthUser,
    kind: EntityKind,
    id: DbId,
    form: AttachmentForm,
) -> AppResult<(StatusCode, Json<DataResponse<AttachmentView>>)> {
    let owner_id = owner_of(&state.pool, kind, id).await?;
    ensure_owner(&user, owner_id, "attach files")?;
    form.validate()?;

    let attachment = AttachmentRepo::create(
        &state.pool,
        &CreateAttachment {
            attachable_type: kind,
            attachable_id: id,
            file_name: form.file_name,
            file_path: form.file_path,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AttachmentView::new(attachment, &state.config),
        }),
    ))
}

/// GET /api/v1/questions/{question_id}/attachments
pub async fn list_for_question(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(question_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AttachmentView>>>> {
    list(state, EntityKind::Question, question_id).await
}

/// POST /api/v1/questions/{question_id}/attachments
pub async fn create_for_question(
    State(state): State<AppState>,
    user: AuthUser,
    Path(question_id): Path<DbId>,
    JsonForm(form): JsonForm<AttachmentForm>,
) -> AppResult<(StatusCode, Json<DataResponse<AttachmentView>>)> {
    create(state, user, EntityKind::Question, question_id, form).await
}

/// GET /api/v1/answers/{answer_id}/attachments
pub async fn list_for_answer(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(answer_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<AttachmentView>>>> {
    list(state, EntityKind::Answer, answer_id).await
}

/// POST /api/v1/answers/{answer_id}/attachments
pub async fn create_for_answer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(answer_id): Path<DbId>,
    JsonForm(form): JsonForm<AttachmentForm>,
) -> AppResult<(StatusCode, Json<DataResponse<AttachmentView>>)> {
    create(state, user, EntityKind::Answer, answer_id, form).await
}

/// DELETE /api/v1/attachments/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let attachment = AttachmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attachment",
            id,
        }))?;

    let kind = EntityKind::parse(&attachment.attachable_type)?;
    let owner_id = owner_of(&state.pool, kind, attachment.attachable_id).await?;
    ensure_owner(&user, owner_id, "remove attachments")?;

    AttachmentRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
