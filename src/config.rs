//! Client configuration
//!
//! [`ClientConfig`] is the immutable base configuration of a [`Client`](crate::Client).
//! [`CallOptions`] carries per-call overrides; [`ClientConfig::merged`] produces a
//! fresh copy for each call so concurrent calls never observe each other's options.

use crate::http::{CallContext, DebugSink, Interceptor, Transport, DEFAULT_MAX_RETRIES};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.fm-track.com";

/// Configuration for the client
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// API key sent as the `api_key` query parameter
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retries after the first attempt (0 disables retrying)
    pub max_retries: u32,
    /// Dump requests and responses to `debug_sink`
    pub debug: bool,
    /// Destination of debug dumps
    pub debug_sink: DebugSink,
    /// User agent string
    pub user_agent: String,
    /// Interceptors, applied in order
    pub interceptors: Vec<Arc<dyn Interceptor>>,
    /// Replacement for the network transport
    pub transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            max_retries: DEFAULT_MAX_RETRIES,
            debug: false,
            debug_sink: DebugSink::stderr(),
            user_agent: format!("trusttrack-rs/{}", env!("CARGO_PKG_VERSION")),
            interceptors: Vec::new(),
            transport: None,
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// A copy of this config with `options` applied.
    ///
    /// Scalar options replace the base value; interceptors are appended.
    pub fn merged(&self, options: &CallOptions) -> ClientConfig {
        let mut config = self.clone();
        if let Some(base_url) = &options.base_url {
            config.base_url.clone_from(base_url);
        }
        if let Some(api_key) = &options.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(timeout) = options.timeout {
            config.timeout = timeout;
        }
        if let Some(max_retries) = options.max_retries {
            config.max_retries = max_retries;
        }
        if let Some(debug) = options.debug {
            config.debug = debug;
        }
        config
            .interceptors
            .extend(options.interceptors.iter().cloned());
        config
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .field("user_agent", &self.user_agent)
            .field("interceptors", &self.interceptors.len())
            .field("custom_transport", &self.transport.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the API key
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Toggle request/response dumps
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Send debug dumps to `sink`
    pub fn debug_sink(mut self, sink: DebugSink) -> Self {
        self.config.debug_sink = sink;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Add an interceptor
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.config.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Replace the network transport
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.config.transport = Some(transport);
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Per-call overrides
#[derive(Clone, Default)]
pub struct CallOptions {
    /// Override the base URL
    pub base_url: Option<String>,
    /// Override the API key
    pub api_key: Option<String>,
    /// Override the request timeout
    pub timeout: Option<Duration>,
    /// Override the retry budget
    pub max_retries: Option<u32>,
    /// Override debug dumps
    pub debug: Option<bool>,
    /// Extra interceptors, applied after the client's own
    pub interceptors: Vec<Arc<dyn Interceptor>>,
    /// Cancellation signal for the call
    pub context: CallContext,
}

impl CallOptions {
    /// Create empty call options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set base URL
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set API key
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set max retries
    #[must_use]
    pub fn retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Toggle debug dumps
    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Add an interceptor
    #[must_use]
    pub fn interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Set the cancellation context
    #[must_use]
    pub fn context(mut self, context: CallContext) -> Self {
        self.context = context;
        self
    }
}

impl fmt::Debug for CallOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallOptions")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .field("interceptors", &self.interceptors.len())
            .field("context", &self.context)
            .finish()
    }
}
