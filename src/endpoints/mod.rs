//! API endpoints
//!
//! Each endpoint is a request struct implementing [`Endpoint`]: it knows its
//! path, query parameters, API version and how to turn the decoded wire
//! payload into domain records. List endpoints additionally implement
//! [`PageRequest`](crate::pagination::PageRequest).
//!
//! | Operation | Path | Version | Token |
//! |-----------|------|---------|-------|
//! | list objects | `/objects` | 1 | - |
//! | list objects last position | `/objects-last-coordinate` | 2 | string |
//! | list object groups | `/object-groups` | 1 | integer |
//! | get object group | `/object-groups/{id}` | 1 | - |
//! | list object coordinates | `/objects/{id}/coordinates` | 2 | timestamp |
//! | list trips | `/objects/{id}/trips` | 1 | timestamp |
//! | list fuel events | `/fuel-events` | 1 | integer |
//! | list drivers | `/drivers` | 2 | integer |

mod coordinates;
mod drivers;
mod fuel_events;
mod object_groups;
mod objects;
mod trips;

pub use coordinates::{ListObjectCoordinatesRequest, DEFAULT_COORDINATES_LIMIT};
pub use drivers::ListDriversRequest;
pub use fuel_events::ListFuelEventsRequest;
pub use object_groups::{GetObjectGroupRequest, ListObjectGroupsRequest};
pub use objects::{ListObjectsLastPositionRequest, ListObjectsRequest};
pub use trips::ListTripsRequest;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;

/// Shorthand for building a segment list
pub(crate) fn segments<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|part| (*part).to_string()).collect()
}

/// Query parameter name of the API version marker
pub const VERSION_PARAM: &str = "version";

/// Query parameter name of the continuation token
pub const CONTINUATION_TOKEN_PARAM: &str = "continuation_token";

/// A single API operation
pub trait Endpoint: Send + Sync {
    /// JSON payload of a 200 response
    type Wire: DeserializeOwned + Send;
    /// What the caller receives
    type Output: Send;

    /// Operation name used as error context, e.g. `"list trips"`
    const OPERATION: &'static str;
    /// Value of the `version` query parameter
    const VERSION: &'static str;

    /// Path segments below the base URL; each is percent-encoded on the wire
    fn path(&self) -> Vec<String>;

    /// Endpoint-specific query parameters (the version marker is added by the client)
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Map the decoded payload into domain records
    fn decode(wire: Self::Wire) -> Self::Output;
}

/// Query builder shared by the endpoint modules
#[derive(Debug, Default)]
pub(crate) struct Query(Vec<(&'static str, String)>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) -> &mut Self {
        self.0.push((name, value.into()));
        self
    }

    /// Set only when `value` is non-empty
    pub fn set_str(&mut self, name: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.set(name, value);
        }
        self
    }

    /// The limit is advisory; zero means "server default"
    pub fn limit(&mut self, limit: u32) -> &mut Self {
        if limit > 0 {
            self.set("limit", limit.to_string());
        }
        self
    }

    pub fn continuation_token(&mut self, token: Option<&str>) -> &mut Self {
        self.set_str(CONTINUATION_TOKEN_PARAM, token)
    }

    pub fn time(&mut self, name: &'static str, time: Option<DateTime<Utc>>) -> &mut Self {
        if let Some(time) = time {
            self.set(name, format_time(time));
        }
        self
    }

    pub fn flag(&mut self, name: &'static str, enabled: bool) -> &mut Self {
        if enabled {
            self.set(name, "true");
        }
        self
    }

    pub fn build(&mut self) -> Vec<(&'static str, String)> {
        std::mem::take(&mut self.0)
    }
}

/// RFC 3339, UTC, second precision
pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests;
