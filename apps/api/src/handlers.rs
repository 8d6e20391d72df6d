pub mod generation;
pub mod health;
pub mod tracks;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use himig_core::AppError;
use tracing::debug;

const INVALID_BODY_MESSAGE: &str = "Invalid request body";

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        debug!(error = %rejection.body_text(), "rejected request body");
        AppError::Validation(INVALID_BODY_MESSAGE.to_owned())
    })
}
