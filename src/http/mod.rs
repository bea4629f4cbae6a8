//! HTTP transport pipeline
//!
//! Requests flow through a chain of [`Transport`] layers built once per call.
//!
//! # Features
//!
//! - **Automatic Retries**: Full-jitter exponential backoff, `Retry-After` aware
//! - **Replayable Bodies**: Request bodies are buffered so every attempt is identical
//! - **Debug Dumps**: Full request/response dumps to a diagnostic stream
//! - **Interceptors**: User-supplied wrappers around the chain
//! - **Cancellation**: Deadlines and cancellation tokens abort I/O and backoff sleeps

pub mod backoff;
pub mod classify;
mod compose;
mod context;
mod debug;
mod interceptor;
mod retry;
mod transport;

pub use compose::compose;
pub use context::CallContext;
pub use debug::{dump_request, dump_response, DebugSink, DebugTransport};
pub use interceptor::{Interceptor, InterceptorTransport, SetHeader};
pub use retry::{ReplayableRequest, RetryTransport, DEFAULT_MAX_RETRIES};
pub use transport::{ReqwestTransport, Transport};

#[cfg(test)]
pub(crate) mod testing;
