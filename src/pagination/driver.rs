//! Continuation-token driver
//!
//! Re-issues a [`PageRequest`] with each returned token until the server
//! answers without one.

use super::types::{Page, PageRequest, PaginationState};
use crate::client::Client;
use crate::config::CallOptions;
use crate::endpoints::Endpoint;
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use tracing::debug;

/// Walks all pages of a list request
///
/// Each page is fetched through [`Client::execute`], so every page gets the
/// full retry/auth/debug pipeline and the same [`CallOptions`].
pub struct Paginator<'a, R> {
    client: &'a Client,
    request: R,
    options: CallOptions,
    state: PaginationState,
}

impl<'a, R> Paginator<'a, R>
where
    R: PageRequest + Endpoint<Output = Page<<R as PageRequest>::Item>>,
{
    /// Start at `request`'s own continuation token (or the first page)
    pub fn new(client: &'a Client, request: R, options: CallOptions) -> Self {
        let mut state = PaginationState::new();
        state.cursor = request.continuation_token().map(str::to_string);
        Self {
            client,
            request,
            options,
            state,
        }
    }

    /// Progress so far
    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    /// Fetch the next page; `Ok(None)` once the last page has been returned
    pub async fn next_page(&mut self) -> Result<Option<Page<R::Item>>> {
        if self.state.done {
            return Ok(None);
        }

        let page = self.client.execute(&self.request, &self.options).await?;
        self.state
            .record_page(page.items.len(), page.continuation_token.as_deref());

        debug!(
            operation = R::OPERATION,
            page = self.state.pages,
            items = page.items.len(),
            last = page.is_last(),
            "Fetched page"
        );

        if let Some(token) = &page.continuation_token {
            self.request = self.request.with_continuation_token(token);
        }
        Ok(Some(page))
    }

    /// Fetch every remaining page and concatenate the items in order
    pub async fn collect_all(mut self) -> Result<Vec<R::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.items);
        }
        Ok(items)
    }

    /// Turn the remaining pages into a stream; the stream ends after the
    /// first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Page<R::Item>>> + 'a
    where
        R: 'a,
    {
        stream::try_unfold(self, |mut paginator| async move {
            let page = paginator.next_page().await?;
            Ok::<_, Error>(page.map(|page| (page, paginator)))
        })
    }
}

impl Client {
    /// Iterate over all pages of `request`
    pub fn paginate<R>(&self, request: R, options: CallOptions) -> Paginator<'_, R>
    where
        R: PageRequest + Endpoint<Output = Page<<R as PageRequest>::Item>>,
    {
        Paginator::new(self, request, options)
    }
}
