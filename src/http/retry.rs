//! Retry transport
//!
//! Buffers the request body once, then replays the whole inner chain until
//! the classifier says stop or the retry budget is spent.

use super::backoff::retry_delay;
use super::classify::should_retry;
use super::context::CallContext;
use super::transport::Transport;
use crate::error::{Error, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Body, Method, Request, Response};
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of retries after the first attempt
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Transport that retries transient failures with backoff
pub struct RetryTransport {
    next: Arc<dyn Transport>,
    max_retries: u32,
}

impl RetryTransport {
    /// Wrap `next` with the default retry budget
    pub fn new(next: Arc<dyn Transport>) -> Self {
        Self::with_max_retries(next, DEFAULT_MAX_RETRIES)
    }

    /// Wrap `next`, allowing at most `max_retries` retries per call
    pub fn with_max_retries(next: Arc<dyn Transport>, max_retries: u32) -> Self {
        Self { next, max_retries }
    }

    /// The retry budget
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl std::fmt::Debug for RetryTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryTransport")
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for RetryTransport {
    async fn round_trip(&self, request: Request, cx: &CallContext) -> Result<Response> {
        let replay = ReplayableRequest::buffer(request)?;
        let mut request = replay.rewind()?;
        let mut attempt: u32 = 1;
        loop {
            let outcome = self.next.round_trip(request, cx).await;
            if attempt - 1 >= self.max_retries {
                return outcome;
            }
            if !should_retry(&outcome, replay.method(), replay.headers()) {
                return outcome;
            }
            let delay = retry_delay(attempt, outcome.as_ref().ok());
            request = replay.rewind()?;
            match outcome {
                Ok(response) => {
                    warn!(
                        "Request failed with {}, attempt {}/{}, retrying in {:?}",
                        response.status().as_u16(),
                        attempt,
                        self.max_retries + 1,
                        delay
                    );
                    // Drain so the connection can go back to the pool.
                    let _ = response.bytes().await;
                }
                Err(err) => {
                    warn!(
                        "Request error: {}, attempt {}/{}, retrying in {:?}",
                        err,
                        attempt,
                        self.max_retries + 1,
                        delay
                    );
                }
            }
            cx.sleep(delay).await?;
            attempt += 1;
        }
    }
}

/// A request whose body has been read into memory so it can be sent again
#[derive(Debug)]
pub struct ReplayableRequest {
    template: Request,
    body: Option<Bytes>,
}

impl ReplayableRequest {
    /// Take the body out of `request` and keep an owned copy.
    ///
    /// Streaming bodies cannot be read back synchronously and are rejected.
    pub fn buffer(mut request: Request) -> Result<Self> {
        let body = match request.body_mut().take() {
            None => None,
            Some(body) => {
                let bytes = body.as_bytes().ok_or_else(|| {
                    Error::body_buffer("request body is a stream and cannot be replayed")
                })?;
                Some(Bytes::copy_from_slice(bytes))
            }
        };
        if let Some(body) = &body {
            debug!("Buffered {} byte request body for replay", body.len());
        }
        Ok(Self {
            template: request,
            body,
        })
    }

    /// A fresh copy of the request with the body reset to its start
    pub fn rewind(&self) -> Result<Request> {
        let mut request = self
            .template
            .try_clone()
            .ok_or_else(|| Error::body_buffer("request could not be cloned for replay"))?;
        if let Some(body) = &self.body {
            *request.body_mut() = Some(Body::from(body.clone()));
        }
        Ok(request)
    }

    /// Request method
    pub fn method(&self) -> &Method {
        self.template.method()
    }

    /// Request headers
    pub fn headers(&self) -> &HeaderMap {
        self.template.headers()
    }

    /// The buffered body, if the request had one
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}
