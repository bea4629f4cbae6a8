//! API key transport
//!
//! The TrustTrack API authenticates through an `api_key` query parameter.

use crate::error::Result;
use crate::http::{CallContext, Transport};
use async_trait::async_trait;
use reqwest::{Request, Response};
use std::sync::Arc;
use url::Url;

/// Query parameter carrying the credential
pub const API_KEY_PARAM: &str = "api_key";

/// Transport that injects the API key into every request
pub struct ApiKeyTransport {
    api_key: String,
    next: Arc<dyn Transport>,
}

impl ApiKeyTransport {
    /// Authenticate requests sent to `next` with `api_key`
    pub fn new(api_key: impl Into<String>, next: Arc<dyn Transport>) -> Self {
        Self {
            api_key: api_key.into(),
            next,
        }
    }
}

impl std::fmt::Debug for ApiKeyTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyTransport")
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for ApiKeyTransport {
    async fn round_trip(&self, mut request: Request, cx: &CallContext) -> Result<Response> {
        set_query_param(request.url_mut(), API_KEY_PARAM, &self.api_key);
        self.next.round_trip(request, cx).await
    }
}

/// Set `name` to `value` in the query string, dropping any previous values under `name`
pub fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(name, value);
}
