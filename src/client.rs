//! TrustTrack API client
//!
//! [`Client`] owns the base configuration and the network transport. Every
//! call merges its [`CallOptions`] into a fresh config, composes the
//! transport chain for that config and runs a single [`Endpoint`].

use crate::config::{CallOptions, ClientConfig};
use crate::endpoints::{Endpoint, VERSION_PARAM};
use crate::error::{Error, Result, ResultExt};
use crate::http::{compose, ReqwestTransport, Transport};
use reqwest::header::{HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Method, Request, StatusCode};
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Typed client for the TrustTrack API
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    raw: Arc<dyn Transport>,
}

impl Client {
    /// Create a client; fails when no API key is configured
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(Error::missing_field("api_key"));
        }

        let raw: Arc<dyn Transport> = match &config.transport {
            Some(transport) => Arc::clone(transport),
            None => {
                let http = reqwest::Client::builder()
                    .user_agent(&config.user_agent)
                    .build()
                    .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;
                Arc::new(ReqwestTransport::new(http))
            }
        };

        Ok(Self { config, raw })
    }

    /// The base configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one endpoint with per-call `options`
    ///
    /// Errors are wrapped with the endpoint's operation name.
    pub async fn execute<E: Endpoint>(&self, endpoint: &E, options: &CallOptions) -> Result<E::Output> {
        self.send(endpoint, options).await.context(E::OPERATION)
    }

    async fn send<E: Endpoint>(&self, endpoint: &E, options: &CallOptions) -> Result<E::Output> {
        let config = self.config.merged(options);
        let transport = compose(&config, Arc::clone(&self.raw));
        let request = build_request(&config, endpoint)?;

        let response = transport.round_trip(request, &options.context).await?;
        if response.status() != StatusCode::OK {
            return Err(Error::from_response(response).await);
        }

        let data = response.bytes().await?;
        debug!(operation = E::OPERATION, bytes = data.len(), "Decoding response");
        let wire: E::Wire = serde_json::from_slice(&data)?;
        Ok(E::decode(wire))
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Build the GET request for `endpoint`: base URL plus path segments, the
/// version marker and the endpoint's query, `User-Agent` and `Accept` headers.
pub(crate) fn build_request<E: Endpoint>(config: &ClientConfig, endpoint: &E) -> Result<Request> {
    let mut url = Url::parse(&config.base_url)?;
    url.path_segments_mut()
        .map_err(|()| Error::config(format!("base URL cannot be a base: {}", config.base_url)))?
        .pop_if_empty()
        .extend(endpoint.path());

    url.query_pairs_mut()
        .append_pair(VERSION_PARAM, E::VERSION)
        .extend_pairs(endpoint.query());

    let user_agent = HeaderValue::from_str(&config.user_agent)
        .map_err(|e| Error::config(format!("invalid user agent: {e}")))?;

    let mut request = Request::new(Method::GET, url);
    request.headers_mut().insert(USER_AGENT, user_agent);
    request
        .headers_mut()
        .insert(ACCEPT, HeaderValue::from_static("application/json"));
    *request.timeout_mut() = Some(config.timeout);
    Ok(request)
}
