//! Download page: every anchor inside any table is a candidate mirror link.

use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use super::selector;

static TABLE_ANCHOR: Lazy<Selector> = Lazy::new(|| selector("table a[href]"));

/// Collect raw hrefs of anchors inside tables. Anchors elsewhere are ignored
/// and no classification of the destination is attempted.
pub fn parse_download_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&TABLE_ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_anchors_from_every_table() {
        let html = r#"<html><body>
            <table><tr><td><a href="https://mega.nz/file/1">Mega</a></td></tr></table>
            <p>Mirrors</p>
            <table><tbody>
                <tr><td><a href="https://1fichier.com/?2">Part 1</a></td>
                    <td><a href="https://1fichier.com/?3">Part 2</a></td></tr>
            </tbody></table>
        </body></html>"#;

        assert_eq!(
            parse_download_links(html),
            vec![
                "https://mega.nz/file/1",
                "https://1fichier.com/?2",
                "https://1fichier.com/?3",
            ]
        );
    }

    #[test]
    fn test_anchors_outside_tables_are_ignored() {
        let html = r#"<a href="https://facebook.com/share">Share</a>
            <table><tr><td><a href="https://mega.nz/file/1">Mega</a></td></tr></table>
            <footer><a href="https://mediafire.com/x">Not a table</a></footer>"#;

        assert_eq!(parse_download_links(html), vec!["https://mega.nz/file/1"]);
    }

    #[test]
    fn test_duplicates_are_kept_for_the_filter() {
        let html = r#"<table><tr>
            <td><a href="https://mega.nz/file/1">A</a></td>
            <td><a href="https://mega.nz/file/1">B</a></td>
            <td><a>no href</a></td>
            <td><a href="  ">blank</a></td>
        </tr></table>"#;

        assert_eq!(
            parse_download_links(html),
            vec!["https://mega.nz/file/1", "https://mega.nz/file/1"]
        );
    }

    #[test]
    fn test_page_without_tables() {
        assert!(parse_download_links("<p>Links coming soon</p>").is_empty());
    }
}
