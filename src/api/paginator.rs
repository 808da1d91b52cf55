//! Link-following paginator
//!
//! Listing endpoints return `{"data": [...], "pagination": {"links": [...]}}`.
//! The paginator follows the link whose relation is `next` until a page no
//! longer carries one. A walk is a single forward pass.

use crate::api::fetcher::ApiClient;
use crate::api::types::{next_link, PageEnvelope};
use crate::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::marker::PhantomData;
use std::ops::ControlFlow;
use url::Url;

/// Forward-only cursor over a paginated listing
pub struct Paginator<'a, T> {
    client: &'a ApiClient,
    next: Option<Url>,
    pages: u64,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> Paginator<'a, T> {
    /// Creates a paginator that starts at `start`
    pub fn new(client: &'a ApiClient, start: Url) -> Self {
        Self {
            client,
            next: Some(start),
            pages: 0,
            _item: PhantomData,
        }
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> u64 {
        self.pages
    }

    /// Whether another page will be requested by `next_page`
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Fetches the next page and returns its items
    ///
    /// Returns `Ok(None)` once the listing is exhausted. A page that lacks
    /// `data` or `pagination.links` is logged and ends the walk; any items it
    /// did carry are still returned.
    pub async fn next_page(&mut self) -> Result<Option<Vec<T>>> {
        let url = match self.next.take() {
            Some(url) => url,
            None => return Ok(None),
        };

        let payload = self.client.fetch_json(&url).await?;
        self.pages += 1;

        let page = PageEnvelope::<T>::deserialize(&payload).map_err(|source| {
            crate::LongrunError::Json {
                url: url.to_string(),
                source,
            }
        })?;

        let links = page.pagination.and_then(|p| p.links);
        let malformed = page.data.is_none() || links.is_none();
        if malformed {
            tracing::warn!("Unexpected page payload from {}: {}", url, payload);
        }

        if let Some(uri) = links.as_deref().and_then(next_link) {
            self.next = Some(Url::parse(uri)?);
        }

        if malformed {
            self.next = None;
        }

        Ok(Some(page.data.unwrap_or_default()))
    }

    /// Hands every page to `consume` until the listing ends or it breaks
    ///
    /// Returns the number of pages fetched.
    pub async fn walk<F>(mut self, mut consume: F) -> Result<u64>
    where
        F: FnMut(Vec<T>) -> ControlFlow<()>,
    {
        while let Some(items) = self.next_page().await? {
            if consume(items).is_break() {
                tracing::debug!("Pagination stopped early after {} pages", self.pages);
                break;
            }
        }

        Ok(self.pages)
    }
}
