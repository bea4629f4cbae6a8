use super::{segments, Endpoint, Query};
use crate::client::Client;
use crate::config::CallOptions;
use crate::error::Result;
use crate::model::Trip;
use crate::pagination::{normalize_token, Page, PageRequest};
use chrono::{DateTime, FixedOffset, Utc};
use serde::Deserialize;

/// List the trips of one object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTripsRequest {
    pub object_id: String,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: u32,
    pub continuation_token: Option<String>,
}

impl ListTripsRequest {
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

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TripPage {
    trips: Vec<Trip>,
    continuation_token: Option<DateTime<FixedOffset>>,
}

impl Endpoint for ListTripsRequest {
    type Wire = TripPage;
    type Output = Page<Trip>;

    const OPERATION: &'static str = "list trips";
    const VERSION: &'static str = "1";

    fn path(&self) -> Vec<String> {
        segments(["objects", self.object_id.as_str(), "trips"])
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        Query::new()
            .time("from_datetime", self.from)
            .time("to_datetime", self.to)
            .limit(self.limit)
            .continuation_token(self.continuation_token.as_deref())
            .build()
    }

    fn decode(wire: Self::Wire) -> Self::Output {
        Page::new(wire.trips, normalize_token(wire.continuation_token.as_ref()))
    }
}

impl PageRequest for ListTripsRequest {
    type Item = Trip;

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
    /// Fetch one page of trips
    pub async fn list_trips(
        &self,
        request: &ListTripsRequest,
        options: &CallOptions,
    ) -> Result<Page<Trip>> {
        self.execute(request, options).await
    }
}
