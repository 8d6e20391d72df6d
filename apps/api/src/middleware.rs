use axum::Json;
use axum::extract::{Extension, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::SecondsFormat;
use himig_application::{ClientFingerprint, RateLimitPolicy, RateLimitVerdict};
use himig_core::{AppError, UserIdentity};

use crate::error::{ApiResult, RateLimitErrorResponse};
use crate::request_context::client_origin;
use crate::state::AppState;

const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET: &str = "x-ratelimit-reset";

/// Attaches the asserted caller identity, when present, as a request extension.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let subject = request
        .headers()
        .get(&state.identity_header)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned);

    if let Some(subject) = subject {
        request.extensions_mut().insert(UserIdentity::new(subject));
    }

    next.run(request).await
}

pub async fn require_identity(request: Request, next: Next) -> ApiResult<Response> {
    if request.extensions().get::<UserIdentity>().is_none() {
        return Err(AppError::Unauthorized("Unauthorized".to_owned()).into());
    }

    Ok(next.run(request).await)
}

pub async fn rate_limit(
    State(state): State<AppState>,
    Extension(policy): Extension<RateLimitPolicy>,
    request: Request,
    next: Next,
) -> Response {
    let fingerprint = ClientFingerprint::new(
        request
            .extensions()
            .get::<UserIdentity>()
            .map(|identity| identity.subject().to_owned()),
        client_origin(request.headers()),
    );

    let verdict = state.rate_limit_service.check(&policy, &fingerprint).await;

    if !verdict.allowed {
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(RateLimitErrorResponse::new(verdict.retry_after_seconds)),
        )
            .into_response();
        apply_rate_limit_headers(response.headers_mut(), &verdict);
        response
            .headers_mut()
            .insert(RETRY_AFTER, HeaderValue::from(verdict.retry_after_seconds));
        return response;
    }

    let mut response = next.run(request).await;
    if response.status().is_success() {
        apply_rate_limit_headers(response.headers_mut(), &verdict);
    }

    response
}

fn apply_rate_limit_headers(headers: &mut HeaderMap, verdict: &RateLimitVerdict) {
    headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(verdict.limit));
    headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(verdict.remaining));

    let reset = verdict
        .reset_at
        .to_rfc3339_opts(SecondsFormat::Millis, true);
    if let Ok(reset) = HeaderValue::from_str(&reset) {
        headers.insert(RATE_LIMIT_RESET, reset);
    }
}
