use super::{segments, Endpoint, Query};
use crate::client::Client;
use crate::config::CallOptions;
use crate::error::Result;
use crate::model::ObjectGroup;
use crate::pagination::{normalize_token, Page, PageRequest};
use serde::Deserialize;

/// List object groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListObjectGroupsRequest {
    /// Page size hint; 0 leaves it to the server
    pub limit: u32,
    /// Resume from this token
    pub continuation_token: Option<String>,
}

/// Object groups answer with an integer token
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ObjectGroupPage {
    items: Vec<ObjectGroup>,
    continuation_token: Option<i32>,
}

impl Endpoint for ListObjectGroupsRequest {
    type Wire = ObjectGroupPage;
    type Output = Page<ObjectGroup>;

    const OPERATION: &'static str = "list object groups";
    const VERSION: &'static str = "1";

    fn path(&self) -> Vec<String> {
        segments(["object-groups"])
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        Query::new()
            .limit(self.limit)
            .continuation_token(self.continuation_token.as_deref())
            .build()
    }

    fn decode(wire: Self::Wire) -> Self::Output {
        Page::new(wire.items, normalize_token(wire.continuation_token.as_ref()))
    }
}

impl PageRequest for ListObjectGroupsRequest {
    type Item = ObjectGroup;

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

/// Fetch a single object group by its external id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetObjectGroupRequest {
    pub external_id: String,
}

impl GetObjectGroupRequest {
    pub fn new(external_id: impl Into<String>) -> Self {
        Self {
            external_id: external_id.into(),
        }
    }
}

impl Endpoint for GetObjectGroupRequest {
    type Wire = ObjectGroup;
    type Output = ObjectGroup;

    const OPERATION: &'static str = "get object group";
    const VERSION: &'static str = "1";

    fn path(&self) -> Vec<String> {
        segments(["object-groups", self.external_id.as_str()])
    }

    fn decode(wire: Self::Wire) -> Self::Output {
        wire
    }
}

impl Client {
    /// Fetch one page of object groups
    pub async fn list_object_groups(
        &self,
        request: &ListObjectGroupsRequest,
        options: &CallOptions,
    ) -> Result<Page<ObjectGroup>> {
        self.execute(request, options).await
    }

    /// Fetch one object group
    pub async fn get_object_group(
        &self,
        request: &GetObjectGroupRequest,
        options: &CallOptions,
    ) -> Result<ObjectGroup> {
        self.execute(request, options).await
    }
}
