//! Transport composition
//!
//! Layers, innermost to outermost: raw → debug → auth → interceptors → retry.
//! Retry sits outside everything so each attempt replays the whole stack,
//! and debug sits closest to the wire.

use super::debug::DebugTransport;
use super::interceptor::InterceptorTransport;
use super::retry::RetryTransport;
use super::transport::Transport;
use crate::auth::ApiKeyTransport;
use crate::config::ClientConfig;
use std::sync::Arc;

/// Build the transport chain for `config` on top of `raw`
pub fn compose(config: &ClientConfig, raw: Arc<dyn Transport>) -> Arc<dyn Transport> {
    let mut transport = raw;
    if config.debug {
        transport = Arc::new(DebugTransport::new(transport, config.debug_sink.clone()));
    }
    if let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
        transport = Arc::new(ApiKeyTransport::new(api_key, transport));
    }
    if !config.interceptors.is_empty() {
        transport = Arc::new(InterceptorTransport::new(
            transport,
            config.interceptors.clone(),
        ));
    }
    if config.max_retries > 0 {
        transport = Arc::new(RetryTransport::with_max_retries(
            transport,
            config.max_retries,
        ));
    }
    transport
}
