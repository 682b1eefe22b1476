//! Request extractors shared by the handlers.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body whose rejections are reported through [`AppError`].
///
/// Malformed JSON and a wrong content type come back with the usual
/// `{error, code}` body instead of axum's plain-text rejection. Forms default
/// absent fields, so a missing field reaches `validate()` in the handler and
/// is reported in the 422 `fields` map after the existence and ownership
/// checks have run.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonForm<T>(pub T);

impl<T, S> FromRequest<S> for JsonForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonForm(value))
    }
}
