//! Paged-fetch aggregation against the upstream collection endpoint.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::FetchError,
    protocol::{Character, CharacterPage},
};
use url::Url;

/// Batch size requested by the viewer on load.
pub const DEFAULT_BATCH_SIZE: usize = 250;

/// Upper bound on pages fetched per batch. The upstream contract says the
/// last page carries `next: null`; this cap keeps one aggregation bounded
/// even when an upstream never says so.
pub const MAX_PAGES_PER_BATCH: u32 = 64;

/// Seam over the upstream paginated endpoint. Production traffic goes
/// through [`CharacterApi`]; tests script their own page sequences.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<CharacterPage, FetchError>;
}

/// HTTP client for the character collection endpoint
/// (`GET <base-url>?page=N`).
#[derive(Debug, Clone)]
pub struct CharacterApi {
    http: Client,
    base_url: Url,
}

impl CharacterApi {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl CharacterSource for CharacterApi {
    async fn fetch_page(&self, page: u32) -> Result<CharacterPage, FetchError> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string());

        tracing::debug!(%url, page, "requesting character page");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::new(format!("request for page {page} failed: {err}")))?
            .error_for_status()
            .map_err(|err| FetchError::new(format!("page {page} returned an error status: {err}")))?;

        response
            .json::<CharacterPage>()
            .await
            .map_err(|err| FetchError::new(format!("page {page} body was not a character page: {err}")))
    }
}

/// Fetches pages starting at `start_page` until `desired_count` characters
/// are collected or the upstream reports its last page, and returns the
/// first `desired_count` of them in upstream order.
///
/// Any failure while any page is in flight aborts the whole batch; partial
/// results are discarded, not returned.
pub async fn fetch_batch<S>(
    source: &S,
    start_page: u32,
    desired_count: usize,
) -> Result<Vec<Character>, FetchError>
where
    S: CharacterSource + ?Sized,
{
    let mut collected: Vec<Character> = Vec::new();
    let mut current_page = start_page;
    let mut pages_fetched: u32 = 0;

    while collected.len() < desired_count {
        if pages_fetched >= MAX_PAGES_PER_BATCH {
            tracing::warn!(
                start_page,
                desired_count,
                collected = collected.len(),
                "page cap reached before desired count; treating as exhausted"
            );
            break;
        }

        let page = source.fetch_page(current_page).await?;
        pages_fetched += 1;
        collected.extend(page.results);

        if page.info.next.is_none() {
            break;
        }
        current_page += 1;
    }

    collected.truncate(desired_count);
    tracing::debug!(
        start_page,
        desired_count,
        collected = collected.len(),
        pages_fetched,
        "aggregated character batch"
    );
    Ok(collected)
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
