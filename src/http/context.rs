//! Per-call cancellation context
//!
//! A `CallContext` carries the caller's cancellation signal (an explicit
//! token and/or a deadline) through every layer of the transport chain.

use crate::error::{CancelReason, Error, Result};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation signal for a single logical call
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that is never cancelled unless `cancel` is called
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an existing cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Abort the call once `deadline` passes
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort the call once `timeout` has elapsed from now
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The token observed by this context
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// The deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire the cancellation signal
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check whether the call should stop now
    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Resolves with the cancellation error once the token fires or the deadline passes
    pub async fn done(&self) -> Error {
        let reason = match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    () = self.token.cancelled() => CancelReason::Cancelled,
                    () = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                CancelReason::Cancelled
            }
        };
        Error::Cancelled { reason }
    }

    /// Sleep for `delay`, returning early with the cancellation error if the context fires first
    pub async fn sleep(&self, delay: Duration) -> Result<()> {
        tokio::select! {
            () = tokio::time::sleep(delay) => Ok(()),
            err = self.done() => Err(err),
        }
    }
}
