use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use herberg_core::CoreError;

/// HTTP-facing wrapper around [`CoreError`].
///
/// Validation failures are client-input errors, not-found is a missing
/// resource, uniqueness violations are conflicts, and store I/O failures are
/// generic server errors with no internal detail in the body.
pub struct ApiError(CoreError);

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoreError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            CoreError::Conflict(e) => (StatusCode::CONFLICT, e.to_string()),
            CoreError::Store(e) if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
            CoreError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herberg_core::{EntityKind, StoreError, ValidationError};

    fn status_of(err: CoreError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(ValidationError::UnknownCountry("NO".to_string()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(
                herberg_core::ConflictError::DuplicateEmail("a@b.co".to_string()).into()
            ),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(
                StoreError::NotFound {
                    kind: EntityKind::City,
                    id: "c1".to_string(),
                }
                .into()
            ),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(StoreError::Corrupt("bad".to_string()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
