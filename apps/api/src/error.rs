use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use himig_core::AppError;
use tracing::error;

mod types;

pub use types::{ErrorResponse, RateLimitErrorResponse};

const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::GenerationFailed(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self.0 {
            AppError::Internal(detail) => {
                error!(error = %detail, "request failed with internal error");
                INTERNAL_ERROR_MESSAGE
            }
            other => other.message(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use himig_core::AppError;

    use super::ApiError;

    #[test]
    fn errors_map_to_http_statuses() {
        let cases = [
            (AppError::Validation("bad".to_owned()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("gone".to_owned()), StatusCode::NOT_FOUND),
            (AppError::Unauthorized("who".to_owned()), StatusCode::UNAUTHORIZED),
            (
                AppError::GenerationFailed("retry".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal("db".to_owned()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError(error).into_response().status(), expected);
        }
    }
}
