//! Testing utilities and mock implementations.
//!
//! Mocks for the two network seams (`PageFetcher`, `LinkResolver`) so the
//! orchestrator and the HTTP API can be exercised without reaching the
//! catalog site.
//!
//! # Example
//!
//! ```rust,ignore
//! use pkgscout_core::testing::{fixtures, MockFetcher};
//!
//! let fetcher = MockFetcher::new();
//! fetcher.set_page("https://catalog.test/a/", fixtures::detail_page("12 GB", "/dll-a/")).await;
//! fetcher.set_page("https://catalog.test/dll-a/", fixtures::download_page(&["https://mega.nz/1"])).await;
//!
//! // Use in LinkOrchestrator::new(...), then inspect fetcher.requests().await
//! ```

mod mock_fetcher;
mod mock_resolver;

pub use mock_fetcher::MockFetcher;
pub use mock_resolver::MockResolver;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::cache::{now_epoch_secs, CacheRecord};
    use crate::catalog::{CatalogSummary, DetailMetadata, DownloadLink, NOT_AVAILABLE};
    use crate::resolver::UnrestrictedLink;

    /// A search results page with one entry per `(title, href)`, plus a
    /// sidebar list that must not be picked up.
    pub fn search_page(items: &[(&str, &str)]) -> String {
        let entries: String = items
            .iter()
            .map(|(title, href)| {
                format!(
                    r#"<li class="grid-style"><article class="item">
                        <div class="thumbnail"><a href="{href}" data-bgset="{href}cover.jpg"></a></div>
                        <h2 class="penci-entry-title"><a href="{href}">{title}</a></h2>
                    </article></li>"#
                )
            })
            .collect();

        format!(
            r#"<html><body>
                <ul class="penci-wrapper">{entries}</ul>
                <aside><ul><li><a href="/popular/">Popular</a></li></ul></aside>
            </body></html>"#
        )
    }

    /// A detail page with a full metadata table and a "Download" button.
    pub fn detail_page(size: &str, download_href: &str) -> String {
        format!(
            r#"<html><body>
                <h1 class="entry-title">God of War PS4</h1>
                <table class="has-fixed-layout"><tbody>
                    <tr><td>Game</td><td>God of War</td></tr>
                    <tr><td>CUSA</td><td>CUSA07408</td></tr>
                    <tr><td>Region</td><td>EUR</td></tr>
                    <tr><td>Version</td><td>1.35</td></tr>
                    <tr><td>Firmware</td><td>5.05</td></tr>
                    <tr><td>Size</td><td>{size}</td></tr>
                </tbody></table>
                <a href="https://twitter.com/intent/tweet">Share</a>
                <a href="{download_href}"><img src="/dl.png" alt="Download"></a>
            </body></html>"#
        )
    }

    /// A download page with every href inside a table, plus navigation
    /// anchors outside any table.
    pub fn download_page(hrefs: &[&str]) -> String {
        let rows: String = hrefs
            .iter()
            .map(|href| format!(r#"<tr><td>Mirror</td><td><a href="{href}">Link</a></td></tr>"#))
            .collect();

        format!(
            r#"<html><body>
                <nav><a href="/">Home</a><a href="https://discord.gg/x">Discord</a></nav>
                <table>{rows}</table>
            </body></html>"#
        )
    }

    /// Metadata that passes the completeness check.
    pub fn complete_metadata() -> DetailMetadata {
        DetailMetadata {
            size: "37.6 GB".to_string(),
            version: "1.35".to_string(),
            region: "EUR".to_string(),
            cusa: "CUSA07408".to_string(),
            firmware: "5.05".to_string(),
            ..Default::default()
        }
    }

    /// A catalog summary with placeholder hints.
    pub fn summary(title: &str, url: &str) -> CatalogSummary {
        CatalogSummary::new(title, url)
    }

    /// A complete record with `link_count` links, `age_secs` old.
    pub fn cache_record(url: &str, link_count: usize, age_secs: f64) -> CacheRecord {
        CacheRecord {
            url: url.to_string(),
            title: "God of War".to_string(),
            size: "37.6 GB".to_string(),
            downloads: NOT_AVAILABLE.to_string(),
            links: (1..=link_count)
                .map(|i| DownloadLink::from(format!("https://mega.nz/file/{}", i)))
                .collect(),
            metadata: complete_metadata(),
            timestamp: now_epoch_secs() - age_secs,
        }
    }

    /// A plausible unrestricted link for `link`.
    pub fn unrestricted(link: &str) -> UnrestrictedLink {
        UnrestrictedLink {
            id: "MOCKID".to_string(),
            filename: "game.pkg".to_string(),
            filesize: 1024 * 1024 * 1024,
            host: crate::links::host_label(link).to_lowercase(),
            download: format!("https://download.mock/d/MOCKID/{}", link.len()),
        }
    }
}
