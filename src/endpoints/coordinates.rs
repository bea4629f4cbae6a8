use super::{segments, Endpoint, Query};
use crate::client::Client;
use crate::config::CallOptions;
use crate::error::Result;
use crate::model::Coordinate;
use crate::pagination::{normalize_token, Page, PageRequest};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

/// Page size used when the caller leaves `limit` at 0
pub const DEFAULT_COORDINATES_LIMIT: u32 = 1000;

/// List the coordinate history of one object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectCoordinatesRequest {
    pub object_id: String,
    /// Inclusive lower bound
    pub from: Option<DateTime<Utc>>,
    /// Upper bound; open-ended when `None`
    pub to: Option<DateTime<Utc>>,
    /// Page size hint; 0 means [`DEFAULT_COORDINATES_LIMIT`]
    pub limit: u32,
    /// Resume from this token
    pub continuation_token: Option<String>,
    pub include_geozones: bool,
    pub include_tire_parameters: bool,
}

impl ListObjectCoordinatesRequest {
    pub fn new(object_id: impl Into<String>) -> Self {
        Self {
            object_id: object_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn between(mut self, from: DateTime<Utc>, to: Option<DateTime<Utc>>) -> Self {
        self.from = Some(from);
        self.to = to;
        self
    }
}

/// Coordinates answer with a timestamp token
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CoordinatePage {
    items: Vec<Coordinate>,
    continuation_token: Option<DateTime<FixedOffset>>,
}

impl Endpoint for ListObjectCoordinatesRequest {
    type Wire = CoordinatePage;
    type Output = Page<Coordinate>;

    const OPERATION: &'static str = "list object coordinates";
    const VERSION: &'static str = "2";

    fn path(&self) -> Vec<String> {
        segments(["objects", self.object_id.as_str(), "coordinates"])
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let limit = if self.limit > 0 {
            self.limit
        } else {
            DEFAULT_COORDINATES_LIMIT
        };
        Query::new()
            .set_str("objectId", Some(self.object_id.as_str()))
            .time("from_datetime", self.from)
            .time("to_datetime", self.to)
            .continuation_token(self.continuation_token.as_deref())
            .limit(limit)
            .flag("include_geozones", self.include_geozones)
            .flag("include_tire_parameters", self.include_tire_parameters)
            .build()
    }

    fn decode(wire: Self::Wire) -> Self::Output {
        Page::new(wire.items, normalize_token(wire.continuation_token.as_ref()))
    }
}

impl PageRequest for ListObjectCoordinatesRequest {
    type Item = Coordinate;

    fn continuation_token(&self) -> Option<&str> {
        self.continuation_token.as_deref()
    }

    fn with_continuation_token(&self, token: &str) -> Self {
        Self {
            continuation_token: Some(token.to_string()),
            ..self.clone()
        }
    }
}

impl Client {
    /// Fetch one page of coordinates
    pub async fn list_object_coordinates(
        &self,
        request: &ListObjectCoordinatesRequest,
        options: &CallOptions,
    ) -> Result<Page<Coordinate>> {
        self.execute(request, options).await
    }
}
