//! Search results page.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::{element_text, selector};
use crate::catalog::CatalogSummary;

static RESULT_ITEM: Lazy<Selector> = Lazy::new(|| selector("li.grid-style article.item"));
static TITLE_LINK: Lazy<Selector> = Lazy::new(|| selector("h2.penci-entry-title a"));
static THUMBNAIL_LINK: Lazy<Selector> = Lazy::new(|| selector("div.thumbnail a"));

/// URL of the site's search page for `query`.
pub fn search_url(base_url: &str, query: &str) -> String {
    format!("{}?s={}", base_url, urlencoding::encode(query.trim()))
}

/// Extract catalog entries in document order.
///
/// Entries without a title link (or with an empty href) are skipped.
pub fn parse_search_results(html: &str) -> Vec<CatalogSummary> {
    let document = Html::parse_document(html);

    document
        .select(&RESULT_ITEM)
        .filter_map(|item| {
            let title_link = item.select(&TITLE_LINK).next()?;
            let url = title_link.value().attr("href")?.trim();
            if url.is_empty() {
                return None;
            }

            let image_ref = item
                .select(&THUMBNAIL_LINK)
                .next()
                .and_then(|a| a.value().attr("data-bgset"))
                .map(str::to_string);

            Some(CatalogSummary {
                image_ref,
                ..CatalogSummary::new(element_text(&title_link), url)
            })
        })
        .collect()
}
