//! HTML extraction for the three page kinds of the catalog site.
//!
//! Parsers never fail: a missing DOM structure yields an empty collection or
//! `None`, and the caller decides whether that is a miss.

mod detail;
mod download;
mod search;

pub use detail::{parse_detail, DetailPage};
pub use download::parse_download_links;
pub use search::{parse_search_results, search_url};

use scraper::{ElementRef, Selector};

/// Compile a selector that is known to be valid at compile time.
fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector must parse")
}

/// Visible text of an element with runs of whitespace collapsed.
fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
