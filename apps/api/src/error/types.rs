use serde::Serialize;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    pub(super) fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Payload returned when a rate limit policy denies a request.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rate-limit-error-response.ts"
)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitErrorResponse {
    pub error: String,
    pub message: String,
    #[ts(type = "number")]
    pub retry_after: u64,
}

impl RateLimitErrorResponse {
    pub fn new(retry_after: u64) -> Self {
        Self {
            error: "Too Many Requests".to_owned(),
            message: format!("Rate limit exceeded. Try again in {retry_after} seconds."),
            retry_after,
        }
    }
}
