//! Handlers for the `/auth` resource (register, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use qna_core::error::CoreError;
use qna_core::forms::{LoginForm, RefreshForm, RegistrationForm};
use qna_core::types::DbId;
use qna_db::models::session::CreateSession;
use qna_db::models::user::{CreateUser, User, UserResponse};
use qna_db::repositories::{SessionRepo, UserRepo};
use serde::Serialize;
use validator::Validate;

use crate::auth::credentials::{hash_password, verify_password};
use crate::auth::tokens::RefreshToken;
use crate::error::{AppError, AppResult};
use crate::extract::JsonForm;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Returned by register, login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

/// POST /api/v1/auth/register
///
/// Create an account and sign it in. A taken email is a 409.
pub async fn register(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<RegistrationForm>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    form.validate()?;

    let password_hash = hash_password(form.password).await?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: form.name,
            email: form.email,
            password_hash,
            role: None,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "User registered");

    let refresh = open_session(&state, user.id).await?;

    Ok((StatusCode::CREATED, Json(auth_response(&state, user, refresh)?)))
}

/// POST /api/v1/auth/login
///
/// Unknown email and wrong password get the same 401.
pub async fn login(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<LoginForm>,
) -> AppResult<Json<AuthResponse>> {
    form.validate()?;
    let invalid = || unauthorized("Invalid email or password");

    let user = UserRepo::find_by_email(&state.pool, &form.email)
        .await?
        .ok_or_else(invalid)?;
    if !verify_password(form.password, user.password_hash.clone()).await? {
        return Err(invalid());
    }

    let refresh = open_session(&state, user.id).await?;
    tracing::debug!(user_id = user.id, "User logged in");

    Ok(Json(auth_response(&state, user, refresh)?))
}

/// POST /api/v1/auth/refresh
///
/// Trade a refresh token for a new pair. The presented token is spent even
/// if the caller never receives the response.
pub async fn refresh(
    State(state): State<AppState>,
    JsonForm(form): JsonForm<RefreshForm>,
) -> AppResult<Json<AuthResponse>> {
    form.validate()?;

    let next = RefreshToken::generate();
    let session = SessionRepo::rotate(
        &state.pool,
        &RefreshToken::digest(&form.refresh_token),
        &next.digest,
        state.tokens.refresh_expires_at(Utc::now()),
    )
    .await?
    .ok_or_else(|| unauthorized("Invalid or expired refresh token"))?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;

    Ok(Json(auth_response(&state, user, next)?))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller. Access tokens already issued stay
/// valid until they expire.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::debug!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

/// Persist a new session for `user_id` and return its refresh token.
async fn open_session(state: &AppState, user_id: DbId) -> AppResult<RefreshToken> {
    let refresh = RefreshToken::generate();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            refresh_token_hash: refresh.digest.clone(),
            expires_at: state.tokens.refresh_expires_at(Utc::now()),
        },
    )
    .await?;
    Ok(refresh)
}

fn auth_response(state: &AppState, user: User, refresh: RefreshToken) -> AppResult<AuthResponse> {
    Ok(AuthResponse {
        access_token: state.tokens.issue_access(user.id, &user.role, Utc::now())?,
        refresh_token: refresh.plaintext,
        expires_in: state.tokens.access_ttl_secs(),
        user: UserResponse::from(user),
    })
}
