//! Pagination module
//!
//! # Overview
//!
//! List endpoints return one page at a time together with an opaque
//! continuation token. Each endpoint encodes its token differently (string,
//! integer, timestamp); [`TokenFormat`] normalizes them all to the string
//! that is echoed back as `continuation_token`. [`Paginator`] drives the
//! loop until a page arrives without a token.

mod driver;
mod types;

pub use driver::Paginator;
pub use types::{normalize_token, Page, PageRequest, PaginationState, TokenFormat};

#[cfg(test)]
mod tests;
