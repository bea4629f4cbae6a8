use super::{segments, Endpoint, Query};
use crate::client::Client;
use crate::config::CallOptions;
use crate::error::Result;
use crate::model::{Driver, IdentifierType};
use crate::pagination::{normalize_token, Page, PageRequest};
use serde::Deserialize;

/// List drivers, optionally filtered by an identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDriversRequest {
    pub limit: u32,
    pub continuation_token: Option<String>,
    pub identifier_type: Option<IdentifierType>,
    pub identifier: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DriverPage {
    items: Vec<Driver>,
    continuation_token: Option<i64>,
}

impl Endpoint for ListDriversRequest {
    type Wire = DriverPage;
    type Output = Page<Driver>;

    const OPERATION: &'static str = "list drivers";
    const VERSION: &'static str = "2";

    fn path(&self) -> Vec<String> {
        segments(["drivers"])
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        let identifier_type = self.identifier_type.clone().map(String::from);
        Query::new()
            .limit(self.limit)
            .continuation_token(self.continuation_token.as_deref())
            .set_str("identifier_type", identifier_type.as_deref())
            .set_str("identifier", self.identifier.as_deref())
            .build()
    }

    fn decode(wire: Self::Wire) -> Self::Output {
        Page::new(wire.items, normalize_token(wire.continuation_token.as_ref()))
    }
}

impl PageRequest for ListDriversRequest {
    type Item = Driver;

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
    /// Fetch one page of drivers
    pub async fn list_drivers(
        &self,
        request: &ListDriversRequest,
        options: &CallOptions,
    ) -> Result<Page<Driver>> {
        self.execute(request, options).await
    }
}
