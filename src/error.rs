//! Error types for the TrustTrack client
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use std::fmt;
use thiserror::Error;

/// Boxed error used as the cause of transport failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for the TrustTrack client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Network error ({kind}): {source}")]
    Transport {
        kind: TransportErrorKind,
        #[source]
        source: BoxError,
    },

    #[error("Request cancelled: {reason}")]
    Cancelled { reason: CancelReason },

    #[error("Failed to buffer request body for retry: {message}")]
    BodyBuffer { message: String },

    #[error("Failed to dump {what} for debug: {message}")]
    DebugDump { what: &'static str, message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    // ============================================================================
    // Credential Errors
    // ============================================================================
    #[error("Credentials error: {message}")]
    Credentials { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Context
    // ============================================================================
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

/// Classification of a failure below the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Host name resolution failed
    Dns,
    /// Connect or read timed out
    Timeout,
    /// Connection could not be established
    Connect,
    /// Anything else (TLS, protocol, body read)
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Dns => "dns",
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Other => "other",
        };
        f.write_str(s)
    }
}

/// Why a call was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The cancellation token fired
    Cancelled,
    /// The call deadline passed
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => f.write_str("context cancelled"),
            Self::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if is_dns_failure(&err) {
            TransportErrorKind::Dns
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        // The URL carries the api_key query parameter.
        Self::Transport {
            kind,
            source: Box::new(err.without_url()),
        }
    }
}

/// hyper-util reports resolver failures as "dns error" somewhere in the chain.
fn is_dns_failure(err: &reqwest::Error) -> bool {
    let mut current: Option<&dyn std::error::Error> = Some(err);
    while let Some(e) = current {
        let message = e.to_string();
        if message.contains("dns error") || message.contains("failed to lookup address") {
            return true;
        }
        current = e.source();
    }
    false
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create a transport error of the given kind
    pub fn transport(kind: TransportErrorKind, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            kind,
            source: source.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Create a body buffering error
    pub fn body_buffer(message: impl Into<String>) -> Self {
        Self::BodyBuffer {
            message: message.into(),
        }
    }

    /// Create a credentials error
    pub fn credentials(message: impl Into<String>) -> Self {
        Self::Credentials {
            message: message.into(),
        }
    }

    /// Build an HTTP status error from a non-200 response.
    ///
    /// The message is the response body, or the status line when the body is empty.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let data = match response.bytes().await {
            Ok(data) => data,
            Err(e) => return e.into(),
        };
        let message = if data.is_empty() {
            match status.canonical_reason() {
                Some(reason) => format!("{} {reason}", status.as_u16()),
                None => status.as_u16().to_string(),
            }
        } else {
            String::from_utf8_lossy(&data).into_owned()
        };
        Self::http_status(status.as_u16(), message)
    }

    /// The innermost error, with all context layers removed
    pub fn root(&self) -> &Error {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// HTTP status code, if this is (or wraps) a status error
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Transport failure kind, if this is (or wraps) a transport error
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self.root() {
            Self::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Check if this is a DNS resolution failure
    pub fn is_dns(&self) -> bool {
        self.transport_kind() == Some(TransportErrorKind::Dns)
    }

    /// Check if this is a network timeout
    pub fn is_timeout(&self) -> bool {
        self.transport_kind() == Some(TransportErrorKind::Timeout)
    }

    /// Check if the caller cancelled the call or its deadline passed
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), Self::Cancelled { .. })
    }
}

/// Result type alias for the TrustTrack client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: message.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("api_key");
        assert_eq!(err.to_string(), "Missing required config field: api_key");

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::Cancelled {
            reason: CancelReason::DeadlineExceeded,
        };
        assert_eq!(err.to_string(), "Request cancelled: deadline exceeded");
    }

    #[test]
    fn test_transport_kind_helpers() {
        let dns = Error::transport(TransportErrorKind::Dns, "no such host");
        assert!(dns.is_dns());
        assert!(!dns.is_timeout());
        assert_eq!(dns.to_string(), "Network error (dns): no such host");

        let timeout = Error::transport(TransportErrorKind::Timeout, "read timed out");
        assert!(timeout.is_timeout());
        assert!(!timeout.is_cancelled());
    }

    #[test]
    fn test_result_context_preserves_cause() {
        let result: Result<()> = Err(Error::http_status(503, "maintenance"));
        let err = result.context("list trips").unwrap_err();

        assert_eq!(err.to_string(), "list trips: HTTP 503: maintenance");
        assert_eq!(err.status(), Some(503));
        assert!(matches!(err.root(), Error::HttpStatus { status: 503, .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_nested_context_root() {
        let result: Result<()> = Err(Error::Cancelled {
            reason: CancelReason::Cancelled,
        });
        let err = result
            .context("inner")
            .with_context(|| "outer".to_string())
            .unwrap_err();

        assert!(err.to_string().starts_with("outer: inner: "));
        assert!(err.is_cancelled());
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_from_response_uses_body() {
        let response: reqwest::Response = http::Response::builder()
            .status(503)
            .body("service down")
            .unwrap()
            .into();
        let err = Error::from_response(response).await;
        assert!(matches!(err, Error::HttpStatus { status: 503, ref message } if message == "service down"));
    }

    #[tokio::test]
    async fn test_from_response_falls_back_to_status_line() {
        let response: reqwest::Response = http::Response::builder()
            .status(404)
            .body(Vec::new())
            .unwrap()
            .into();
        let err = Error::from_response(response).await;
        assert_eq!(err.to_string(), "HTTP 404: 404 Not Found");
    }
}
