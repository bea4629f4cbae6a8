//! Backoff policy
//!
//! Honors a server `Retry-After` hint (seconds or HTTP date, jittered by ±33.3%)
//! and otherwise falls back to full-jitter exponential backoff.

use chrono::{DateTime, Utc};
use rand::Rng;
use reqwest::header::RETRY_AFTER;
use reqwest::Response;
use std::time::Duration;

/// Base unit of the exponential backoff
pub const BASE_DELAY: Duration = Duration::from_millis(250);

/// Upper bound of the exponential backoff
pub const MAX_DELAY: Duration = Duration::from_secs(10);

/// Relative magnitude of the jitter applied to `Retry-After` delays
pub const RETRY_AFTER_JITTER: f64 = 0.333;

/// Delay before the attempt following `attempt` (1-based)
pub fn retry_delay(attempt: u32, response: Option<&Response>) -> Duration {
    let hint = response
        .and_then(|r| r.headers().get(RETRY_AFTER))
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .and_then(|v| parse_retry_after(v, Utc::now()));
    match hint {
        Some(delay) => add_jitter(delay),
        None => exponential_backoff(attempt),
    }
}

/// Parse a `Retry-After` value as integer seconds or an HTTP date relative to `now`.
///
/// Dates in the past and negative values yield a zero delay.
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<i64>() {
        return Some(Duration::from_secs(seconds.max(0).unsigned_abs()));
    }
    let date = DateTime::parse_from_rfc2822(value).ok()?;
    Some(
        date.with_timezone(&Utc)
            .signed_duration_since(now)
            .to_std()
            .unwrap_or(Duration::ZERO),
    )
}

/// Full jitter: uniform in `[0, min(MAX_DELAY, BASE_DELAY * 2^(attempt-1)))`
pub fn exponential_backoff(attempt: u32) -> Duration {
    let exp = 2f64.powi(attempt.saturating_sub(1).min(62) as i32);
    let ceiling = (BASE_DELAY.as_nanos() as f64 * exp).min(MAX_DELAY.as_nanos() as f64) as u64;
    if ceiling == 0 {
        return Duration::ZERO;
    }
    Duration::from_nanos(rand::thread_rng().gen_range(0..ceiling))
}

/// Spread `delay` uniformly by up to ±33.3%
pub fn add_jitter(delay: Duration) -> Duration {
    let mut rng = rand::thread_rng();
    let base = delay.as_secs_f64();
    let jitter = rng.gen::<f64>() * base * RETRY_AFTER_JITTER;
    if rng.gen_bool(0.5) {
        Duration::from_secs_f64(base + jitter)
    } else {
        Duration::from_secs_f64(base - jitter)
    }
}
