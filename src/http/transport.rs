//! The transport seam
//!
//! Every layer of the request pipeline implements [`Transport`]: it receives
//! a fully built request and returns the response (or a network failure).
//! Non-2xx responses are *not* errors at this level.

use super::context::CallContext;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Request, Response};
use std::sync::Arc;
use tracing::debug;

/// One hop of the request pipeline
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request` and return whatever the next hop produced
    async fn round_trip(&self, request: Request, cx: &CallContext) -> Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn round_trip(&self, request: Request, cx: &CallContext) -> Result<Response> {
        (**self).round_trip(request, cx).await
    }
}

/// Innermost transport: sends requests over the network with reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing reqwest client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn round_trip(&self, request: Request, cx: &CallContext) -> Result<Response> {
        // Only the path is logged: the query carries the API key.
        debug!("{} {}", request.method(), request.url().path());
        tokio::select! {
            result = self.client.execute(request) => Ok(result?),
            err = cx.done() => Err(err),
        }
    }
}
