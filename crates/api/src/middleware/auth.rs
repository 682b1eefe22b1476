//! Bearer-token authentication for handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use qna_core::error::CoreError;
use qna_core::roles::ROLE_ADMIN;
use qna_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The signed-in user behind the request's access token.
///
/// Taking `AuthUser` as a handler argument makes the route require
/// authentication: a missing, malformed, forged or expired token is a 401.
/// The result is cached on the request, so stacking extractors that need
/// the user verifies the token once.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.to_string()))
}

/// Token from an `Authorization: Bearer <token>` header. The scheme name is
/// case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| unauthorized("Authorization header is not valid text"))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(unauthorized("Expected Authorization: Bearer <token>")),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let token = bearer_token(&parts.headers)?;
        let claims = state
            .tokens
            .verify(token)
            .ok_or_else(|| unauthorized("Invalid or expired token"))?;

        let user = AuthUser {
            user_id: claims.sub,
            role: claims.role,
        };
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(bearer_token(&headers("bearer abc.def")).unwrap(), "abc.def");
    }

    #[test]
    fn other_schemes_and_empty_tokens_are_rejected() {
        for value in ["Basic dXNlcjpwdw==", "Bearer ", "Bearer", "abc.def"] {
            assert_matches!(
                bearer_token(&headers(value)),
                Err(AppError::Core(CoreError::Unauthorized(_))),
                "{value}"
            );
        }
    }

    #[test]
    fn missing_header_is_unauthorized() {
        assert_matches!(
            bearer_token(&HeaderMap::new()),
            Err(AppError::Core(CoreError::Unauthorized(_)))
        );
    }

    #[test]
    fn only_the_admin_role_is_admin() {
        let user = AuthUser {
            user_id: 1,
            role: "user".to_string(),
        };
        assert!(!user.is_admin());
        assert!(AuthUser {
            role: ROLE_ADMIN.to_string(),
            ..user
        }
        .is_admin());
    }
}
