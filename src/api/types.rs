//! Shared types for the API layer.

use std::sync::Arc;

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::models::PatientId;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Parse a `:id` path segment. Kept as text in the route so a malformed id
/// gets the same JSON error body as every other failure.
pub fn parse_patient_id(raw: &str) -> Result<PatientId, ApiError> {
    raw.trim()
        .parse::<PatientId>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid patient id: {raw:?}")))
}

// ═══════════════════════════════════════════════════════════
// Extractors: axum rejections rendered as ApiError
// ═══════════════════════════════════════════════════════════

/// `Json<T>` whose rejection is an [`ApiError`], so a body that fails to
/// deserialize gets the `{error:{code,message}}` envelope.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// `Query<T>` whose rejection is an [`ApiError`].
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_id() {
        assert_eq!(parse_patient_id("42").unwrap(), 42);
        assert_eq!(parse_patient_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn rejects_non_numeric_id() {
        assert!(matches!(parse_patient_id("abc"), Err(ApiError::BadRequest(_))));
        assert!(matches!(parse_patient_id("-1"), Err(ApiError::BadRequest(_))));
    }
}
