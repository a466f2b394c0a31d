//! Blocklist filtering and deduplication of extracted hrefs.

use std::collections::HashSet;

use reqwest::Url;

use crate::catalog::DownloadLink;

/// Domains that are never download mirrors: the catalog site itself and
/// social-media share buttons.
pub const DEFAULT_IGNORE_DOMAINS: &[&str] = &["superpsx", "facebook", "twitter", "discord"];

/// Drops blocklisted hrefs and deduplicates the rest.
///
/// Matching is a case-sensitive substring test against the whole href.
#[derive(Debug, Clone, Default)]
pub struct LinkFilter {
    blocklist: Vec<String>,
}

impl LinkFilter {
    /// Create a filter with exactly the given blocklist.
    ///
    /// Empty entries are ignored, they would otherwise match every href.
    pub fn new<I, S>(blocklist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<String> = Vec::new();
        for entry in blocklist {
            let entry = entry.into();
            if !entry.is_empty() && !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        Self { blocklist: entries }
    }

    /// Built-in blocklist extended with configured domains.
    pub fn with_defaults(extra: &[String]) -> Self {
        Self::new(
            DEFAULT_IGNORE_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .chain(extra.iter().cloned()),
        )
    }

    pub fn blocklist(&self) -> &[String] {
        &self.blocklist
    }

    /// Whether any blocklisted domain occurs in `href`.
    pub fn is_blocked(&self, href: &str) -> bool {
        self.blocklist.iter().any(|domain| href.contains(domain.as_str()))
    }

    /// Filter raw hrefs. The result is a set; no ordering is implied.
    pub fn filter<I, S>(&self, hrefs: I) -> HashSet<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        hrefs
            .into_iter()
            .map(Into::into)
            .filter(|href| !self.is_blocked(href))
            .collect()
    }

    /// Filter links of either shape, keeping the first link seen per URL.
    pub fn filter_links<I>(&self, links: I) -> Vec<DownloadLink>
    where
        I: IntoIterator<Item = DownloadLink>,
    {
        let mut seen: HashSet<String> = HashSet::new();
        links
            .into_iter()
            .filter(|link| !self.is_blocked(link.url()))
            .filter(|link| seen.insert(link.url().to_string()))
            .collect()
    }
}

/// Short display name for the host of a link, e.g. `Mega` for
/// `https://www.mega.nz/file/x`. Falls back to `Link`.
pub fn host_label(url: &str) -> String {
    let host = match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        Some(host) => host,
        None => return "Link".to_string(),
    };

    let host = host.strip_prefix("www.").unwrap_or(&host);
    let name = host.split('.').next().unwrap_or_default();

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => "Link".to_string(),
    }
}
