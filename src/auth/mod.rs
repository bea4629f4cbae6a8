//! Authentication module
//!
//! Injects the API key into outgoing requests and stores it between CLI runs.

mod api_key;
mod credentials;

pub use api_key::{set_query_param, ApiKeyTransport, API_KEY_PARAM};
pub use credentials::{CredentialStore, FileCredentialStore};
