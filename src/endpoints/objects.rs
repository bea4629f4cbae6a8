use super::{segments, Endpoint, Query};
use crate::client::Client;
use crate::config::CallOptions;
use crate::error::Result;
use crate::model::Object;
use crate::pagination::{normalize_token, Page, PageRequest};
use serde::Deserialize;

/// List all objects visible to the API key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsRequest;

impl Endpoint for ListObjectsRequest {
    type Wire = Vec<Object>;
    type Output = Vec<Object>;

    const OPERATION: &'static str = "list objects";
    const VERSION: &'static str = "1";

    fn path(&self) -> Vec<String> {
        segments(["objects"])
    }

    fn decode(wire: Self::Wire) -> Self::Output {
        wire
    }
}

/// List objects together with their last known coordinate
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectsLastPositionRequest {
    /// Page size hint; 0 leaves it to the server
    pub limit: u32,
    /// Resume from this token
    pub continuation_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LastPositionPage {
    results: Vec<Object>,
    continuation_token: Option<String>,
}

impl Endpoint for ListObjectsLastPositionRequest {
    type Wire = LastPositionPage;
    type Output = Page<Object>;

    const OPERATION: &'static str = "list objects last position";
    const VERSION: &'static str = "2";

    fn path(&self) -> Vec<String> {
        segments(["objects-last-coordinate"])
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        Query::new()
            .limit(self.limit)
            .continuation_token(self.continuation_token.as_deref())
            .build()
    }

    fn decode(wire: Self::Wire) -> Self::Output {
        Page::new(wire.results, normalize_token(wire.continuation_token.as_ref()))
    }
}

impl PageRequest for ListObjectsLastPositionRequest {
    type Item = Object;

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
    /// List all objects
    pub async fn list_objects(&self, options: &CallOptions) -> Result<Vec<Object>> {
        self.execute(&ListObjectsRequest, options).await
    }

    /// Fetch one page of objects with their last position
    pub async fn list_objects_last_position(
        &self,
        request: &ListObjectsLastPositionRequest,
        options: &CallOptions,
    ) -> Result<Page<Object>> {
        self.execute(request, options).await
    }
}
