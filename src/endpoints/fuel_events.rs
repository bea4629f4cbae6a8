use super::{segments, Endpoint, Query};
use crate::client::Client;
use crate::config::CallOptions;
use crate::error::Result;
use crate::model::FuelEvent;
use crate::pagination::{normalize_token, Page, PageRequest};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// List refuel and drain events, optionally for a single object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFuelEventsRequest {
    /// Restrict to one object; all objects when `None`
    pub object_id: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: u32,
    pub continuation_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FuelEventPage {
    items: Vec<FuelEvent>,
    continuation_token: Option<i64>,
}

impl Endpoint for ListFuelEventsRequest {
    type Wire = FuelEventPage;
    type Output = Page<FuelEvent>;

    const OPERATION: &'static str = "list fuel events";
    const VERSION: &'static str = "1";

    fn path(&self) -> Vec<String> {
        segments(["fuel-events"])
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        Query::new()
            .set_str("object_id", self.object_id.as_deref())
            .time("from_datetime", self.from)
            .time("to_datetime", self.to)
            .limit(self.limit)
            .continuation_token(self.continuation_token.as_deref())
            .build()
    }

    fn decode(wire: Self::Wire) -> Self::Output {
        Page::new(wire.items, normalize_token(wire.continuation_token.as_ref()))
    }
}

impl PageRequest for ListFuelEventsRequest {
    type Item = FuelEvent;

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
    /// Fetch one page of fuel events
    pub async fn list_fuel_events(
        &self,
        request: &ListFuelEventsRequest,
        options: &CallOptions,
    ) -> Result<Page<FuelEvent>> {
        self.execute(request, options).await
    }
}
