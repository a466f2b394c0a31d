//! Link orchestrator implementation.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Url;
use tracing::{debug, info, warn};

use crate::cache::LinkCache;
use crate::catalog::{CatalogSummary, DetailMetadata, DownloadLink};
use crate::config::ScraperConfig;
use crate::fetcher::{PageFetcher, RawPage};
use crate::links::LinkFilter;
use crate::metrics::{DETAILS_RESOLVED, FETCH_DURATION, LINKS_EXTRACTED, PAGE_FETCHES};
use crate::parser::{parse_detail, parse_download_links, parse_search_results, search_url};

use super::types::{DetailsSource, ItemDetails, Resolution};

/// Drives search and details requests through fetcher, parsers, filter and
/// cache.
pub struct LinkOrchestrator {
    base_url: String,
    fetcher: Arc<dyn PageFetcher>,
    cache: Arc<dyn LinkCache>,
    filter: LinkFilter,
}

impl LinkOrchestrator {
    /// Create an orchestrator. The blocklist is the built-in one extended by
    /// `scraper.ignore_domains`.
    pub fn new(
        scraper: &ScraperConfig,
        fetcher: Arc<dyn PageFetcher>,
        cache: Arc<dyn LinkCache>,
    ) -> Self {
        Self {
            base_url: scraper.base_url.clone(),
            fetcher,
            cache,
            filter: LinkFilter::with_defaults(&scraper.ignore_domains),
        }
    }

    /// Replace the link filter.
    pub fn with_filter(mut self, filter: LinkFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn cache(&self) -> &Arc<dyn LinkCache> {
        &self.cache
    }

    pub fn filter(&self) -> &LinkFilter {
        &self.filter
    }

    /// Search the catalog. Blank queries and fetch failures yield no results.
    pub async fn search(&self, query: &str) -> Vec<CatalogSummary> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let url = search_url(&self.base_url, query);
        let Some(page) = self.fetch_page("search", &url).await else {
            return Vec::new();
        };

        let results = parse_search_results(&page.body);
        info!(query = %query.trim(), results = results.len(), "Search completed");
        results
    }

    /// Resolve metadata and download links for a catalog item.
    ///
    /// Always returns a value: fetch failures and missing page structure
    /// both end in [`Resolution::ResolvedEmpty`].
    pub async fn details(&self, item: &CatalogSummary) -> ItemDetails {
        if let Some(record) = self.cache.get(&item.url) {
            debug!(url = %item.url, links = record.links.len(), "Cache hit");
            DETAILS_RESOLVED.with_label_values(&["cached"]).inc();
            return ItemDetails {
                status: Resolution::Resolved,
                source: DetailsSource::Cache,
                size: record.size,
                metadata: record.metadata,
                links: record.links,
            };
        }

        let detail_url = self.absolute(&item.url);
        let Some(page) = self.fetch_page("detail", &detail_url).await else {
            return self.empty(item.size_hint.clone(), fallback_metadata(item));
        };

        let detail = parse_detail(&page.body, &item.size_hint);

        let Some(reference) = detail.download_page.as_deref() else {
            debug!(url = %item.url, "No download page reference");
            return self.empty(detail.size, detail.metadata);
        };

        let download_url = resolve_reference(&page.url, reference);
        let links = match self.fetch_page("download", &download_url).await {
            Some(download) => self.extract_links(&download.body),
            None => Vec::new(),
        };
        LINKS_EXTRACTED.observe(links.len() as f64);

        if links.is_empty() {
            debug!(url = %item.url, "No download links survived filtering");
            return self.empty(detail.size, detail.metadata);
        }

        let updated = item.with_size(&detail.size);
        let record = self.cache.save(
            &updated.url,
            &updated.title,
            &updated.downloads_hint,
            links,
            detail.metadata,
        );

        info!(url = %item.url, links = record.links.len(), size = %record.size, "Resolved download links");
        DETAILS_RESOLVED.with_label_values(&["resolved"]).inc();

        ItemDetails {
            status: Resolution::Resolved,
            source: DetailsSource::Live,
            size: record.size,
            metadata: record.metadata,
            links: record.links,
        }
    }

    /// Parse, filter and order the links of a download page.
    fn extract_links(&self, html: &str) -> Vec<DownloadLink> {
        let mut links: Vec<String> = self
            .filter
            .filter(parse_download_links(html))
            .into_iter()
            .collect();
        links.sort();
        links.into_iter().map(DownloadLink::from).collect()
    }

    fn empty(&self, size: String, metadata: DetailMetadata) -> ItemDetails {
        DETAILS_RESOLVED.with_label_values(&["empty"]).inc();
        ItemDetails::empty(size, metadata)
    }

    async fn fetch_page(&self, kind: &str, url: &str) -> Option<RawPage> {
        let started = Instant::now();
        let result = self.fetcher.fetch(url).await;
        FETCH_DURATION
            .with_label_values(&[kind])
            .observe(started.elapsed().as_secs_f64());

        match result {
            Ok(page) => {
                PAGE_FETCHES.with_label_values(&[kind, "success"]).inc();
                Some(page)
            }
            Err(e) => {
                PAGE_FETCHES.with_label_values(&[kind, "error"]).inc();
                warn!(page = kind, url = %url, error = %e, "Page fetch failed");
                None
            }
        }
    }

    /// Detail URLs from search pages may be site-relative.
    fn absolute(&self, url: &str) -> String {
        resolve_reference(&self.base_url, url)
    }
}

fn fallback_metadata(item: &CatalogSummary) -> DetailMetadata {
    DetailMetadata {
        size: item.size_hint.clone(),
        ..Default::default()
    }
}

/// Resolve `reference` against `base`. Absolute references are returned
/// verbatim, as is anything that cannot be joined.
fn resolve_reference(base: &str, reference: &str) -> String {
    if Url::parse(reference).is_ok() {
        return reference.to_string();
    }
    match Url::parse(base).and_then(|b| b.join(reference)) {
        Ok(joined) => joined.to_string(),
        Err(_) => reference.to_string(),
    }
}
