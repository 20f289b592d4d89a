/**
 * JSON Body Extractor
 *
 * `ValidatedJson` wraps axum's `Json` so that a body which is not JSON,
 * lacks the JSON content type, or has a wrongly typed field is rejected
 * with a 400 field map instead of axum's plain-text 415/422.
 */

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::backend::error::BackendError;

/// JSON request body whose rejections are `BackendError::Validation`
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                BackendError::from(rejection)
            })?;
        Ok(ValidatedJson(value))
    }
}
