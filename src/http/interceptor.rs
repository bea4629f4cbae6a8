//! User-supplied transport interceptors
//!
//! An interceptor wraps a transport in another transport. The interceptor
//! transport rebuilds the wrapped chain on every call, applying interceptors
//! in registration order.

use super::context::CallContext;
use super::transport::Transport;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Request, Response};
use std::sync::Arc;

/// Wraps a transport with custom behavior
pub trait Interceptor: Send + Sync {
    /// Return a transport that delegates to `next`
    fn wrap(&self, next: Arc<dyn Transport>) -> Arc<dyn Transport>;
}

impl<F> Interceptor for F
where
    F: Fn(Arc<dyn Transport>) -> Arc<dyn Transport> + Send + Sync,
{
    fn wrap(&self, next: Arc<dyn Transport>) -> Arc<dyn Transport> {
        self(next)
    }
}

/// Transport that applies a list of interceptors before delegating
pub struct InterceptorTransport {
    interceptors: Vec<Arc<dyn Interceptor>>,
    next: Arc<dyn Transport>,
}

impl InterceptorTransport {
    /// Apply `interceptors` around `next`
    pub fn new(next: Arc<dyn Transport>, interceptors: Vec<Arc<dyn Interceptor>>) -> Self {
        Self { interceptors, next }
    }
}

#[async_trait]
impl Transport for InterceptorTransport {
    async fn round_trip(&self, request: Request, cx: &CallContext) -> Result<Response> {
        let mut transport = Arc::clone(&self.next);
        for interceptor in &self.interceptors {
            transport = interceptor.wrap(transport);
        }
        transport.round_trip(request, cx).await
    }
}

/// Interceptor that sets a static header on every request
#[derive(Debug, Clone)]
pub struct SetHeader {
    name: HeaderName,
    value: HeaderValue,
}

impl SetHeader {
    /// Set `name: value`, replacing any existing value
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }
}

impl Interceptor for SetHeader {
    fn wrap(&self, next: Arc<dyn Transport>) -> Arc<dyn Transport> {
        Arc::new(SetHeaderTransport {
            header: self.clone(),
            next,
        })
    }
}

struct SetHeaderTransport {
    header: SetHeader,
    next: Arc<dyn Transport>,
}

#[async_trait]
impl Transport for SetHeaderTransport {
    async fn round_trip(&self, mut request: Request, cx: &CallContext) -> Result<Response> {
        request
            .headers_mut()
            .insert(self.header.name.clone(), self.header.value.clone());
        self.next.round_trip(request, cx).await
    }
}
