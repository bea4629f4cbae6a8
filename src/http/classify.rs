//! Retry classification
//!
//! Decides from a completed attempt whether another attempt is warranted.

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Method, Response, StatusCode};

/// Headers that mark an otherwise unsafe request as replayable
pub const IDEMPOTENCY_KEY_HEADERS: [&str; 2] = ["Idempotency-Key", "X-Idempotency-Key"];

/// Check whether a request may be sent more than once without duplicating side effects
pub fn is_idempotent(method: &Method, headers: &HeaderMap) -> bool {
    if IDEMPOTENCY_KEY_HEADERS
        .iter()
        .any(|name| has_non_empty(headers, name))
    {
        return true;
    }
    matches!(
        *method,
        Method::GET | Method::HEAD | Method::OPTIONS | Method::TRACE | Method::PUT | Method::DELETE
    )
}

/// Decide whether the outcome of an attempt should be retried
pub fn should_retry(outcome: &Result<Response>, method: &Method, headers: &HeaderMap) -> bool {
    match outcome {
        Err(err) => should_retry_error(err, method, headers),
        Ok(response) => should_retry_response(response, method, headers),
    }
}

/// Transport failures: DNS always, timeouts only for idempotent requests
pub fn should_retry_error(err: &Error, method: &Method, headers: &HeaderMap) -> bool {
    err.is_dns() || (err.is_timeout() && is_idempotent(method, headers))
}

/// Received responses: any `Retry-After`, any 429, and 5xx gateway errors for idempotent requests
pub fn should_retry_response(response: &Response, method: &Method, headers: &HeaderMap) -> bool {
    if has_non_empty(response.headers(), RETRY_AFTER.as_str()) {
        return true;
    }
    match response.status() {
        StatusCode::TOO_MANY_REQUESTS => true,
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => is_idempotent(method, headers),
        _ => false,
    }
}

fn has_non_empty(headers: &HeaderMap, name: &str) -> bool {
    headers.get(name).is_some_and(|value| !value.is_empty())
}
