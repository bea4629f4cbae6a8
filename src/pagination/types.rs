//! Pagination types and traits
//!
//! Defines the page shape, the continuation-token contract and the
//! request trait shared by all list endpoints.

use crate::endpoints::Endpoint;
use chrono::{DateTime, FixedOffset, SecondsFormat};

/// One page of results
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Token for the next page; `None` on the last page
    pub continuation_token: Option<String>,
}

impl<T> Page<T> {
    /// Create a page, treating an empty token as "no more pages"
    pub fn new(items: Vec<T>, continuation_token: Option<String>) -> Self {
        Self {
            items,
            continuation_token: continuation_token.filter(|t| !t.is_empty()),
        }
    }

    /// Check if this is the last page
    pub fn is_last(&self) -> bool {
        self.continuation_token.is_none()
    }
}

/// Endpoint-specific continuation token representation
///
/// Each endpoint returns its token in a fixed type; this normalizes it to the
/// string that is sent back verbatim as `continuation_token`.
pub trait TokenFormat {
    /// String form of the token
    fn to_token(&self) -> String;
}

impl TokenFormat for i32 {
    fn to_token(&self) -> String {
        self.to_string()
    }
}

impl TokenFormat for i64 {
    fn to_token(&self) -> String {
        self.to_string()
    }
}

impl TokenFormat for String {
    fn to_token(&self) -> String {
        self.clone()
    }
}

/// RFC 3339 with second precision, `Z` for UTC
impl TokenFormat for DateTime<FixedOffset> {
    fn to_token(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

/// Normalize an optional wire token; empty strings become `None`
pub fn normalize_token<T: TokenFormat>(token: Option<&T>) -> Option<String> {
    token.map(TokenFormat::to_token).filter(|t| !t.is_empty())
}

/// A list request that can be re-issued with a continuation token
///
/// Implementors also implement [`Endpoint`] with `Output = Page<Self::Item>`.
pub trait PageRequest: Endpoint + Clone {
    /// Record type of the list
    type Item;

    /// The token this request starts from
    fn continuation_token(&self) -> Option<&str>;

    /// A copy of this request starting at `token`
    fn with_continuation_token(&self, token: &str) -> Self;
}

/// Tracks pagination progress during iteration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages: u32,
    /// Items fetched so far
    pub items: u64,
    /// Last token received
    pub cursor: Option<String>,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fetched page
    pub fn record_page(&mut self, items: usize, cursor: Option<&str>) {
        self.pages += 1;
        self.items += items as u64;
        self.cursor = cursor.map(str::to_string);
        if cursor.is_none() {
            self.done = true;
        }
    }
}
