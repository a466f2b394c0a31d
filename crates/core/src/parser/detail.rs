//! Item detail page: metadata table and the link to the download page.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::{ElementRef, Html, Selector};

use super::{element_text, selector};
use crate::catalog::{DetailMetadata, NOT_AVAILABLE};

static METADATA_ROW: Lazy<Selector> = Lazy::new(|| selector("table.has-fixed-layout tr"));
static ANY_TABLE_ROW: Lazy<Selector> = Lazy::new(|| selector("table tr"));
static CELL: Lazy<Selector> = Lazy::new(|| selector("td"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static DOWNLOAD_IMAGE: Lazy<Selector> = Lazy::new(|| selector(r#"img[alt="Download"]"#));
static CUSA_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"CUSA\d{5}").expect("static regex must compile"));

/// Naming pattern of download page slugs, e.g. `/dll-god-of-war/`.
const DOWNLOAD_PAGE_MARKER: &str = "dll-";

/// Result of parsing a detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailPage {
    /// Size from the first row labelled "size", else the previous size.
    pub size: String,
    /// Full metadata; `metadata.size` always equals `size`.
    pub metadata: DetailMetadata,
    /// href of the download page link, exactly as written in the page.
    pub download_page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Size,
    Cusa,
    Firmware,
    Version,
    Region,
    Voice,
    Subtitles,
    Password,
}

/// Row label keywords per field, checked in order; a row feeds the first
/// field whose keyword occurs in its lower-cased label.
const FIELD_KEYWORDS: &[(Field, &[&str])] = &[
    (Field::Size, &["size"]),
    (Field::Cusa, &["cusa", "title id", "serial"]),
    (Field::Firmware, &["firmware", "fw"]),
    (Field::Version, &["version", "update"]),
    (Field::Region, &["region"]),
    (Field::Voice, &["voice", "audio"]),
    (Field::Subtitles, &["subtitle", "text"]),
    (Field::Password, &["password", "pass"]),
];

fn classify(label: &str) -> Option<Field> {
    FIELD_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| label.contains(k)))
        .map(|(field, _)| *field)
}

fn slot(metadata: &mut DetailMetadata, field: Field) -> &mut String {
    match field {
        Field::Size => &mut metadata.size,
        Field::Cusa => &mut metadata.cusa,
        Field::Firmware => &mut metadata.firmware,
        Field::Version => &mut metadata.version,
        Field::Region => &mut metadata.region,
        Field::Voice => &mut metadata.voice,
        Field::Subtitles => &mut metadata.subtitles,
        Field::Password => &mut metadata.password,
    }
}

/// Parse a detail page.
///
/// `previous_size` is returned unchanged when no row mentions a size; it is
/// never replaced by a placeholder.
pub fn parse_detail(html: &str, previous_size: &str) -> DetailPage {
    let document = Html::parse_document(html);

    let mut rows: Vec<ElementRef<'_>> = document.select(&METADATA_ROW).collect();
    if rows.is_empty() {
        rows = document.select(&ANY_TABLE_ROW).collect();
    }

    let mut metadata = DetailMetadata::default();
    let mut size: Option<String> = None;

    for row in rows {
        let cells: Vec<ElementRef<'_>> = row.select(&CELL).collect();
        if cells.len() < 2 {
            continue;
        }

        let label = element_text(&cells[0]).to_lowercase();
        let Some(field) = classify(&label) else {
            continue;
        };
        let value = element_text(&cells[1]);

        if field == Field::Size {
            if size.is_none() {
                size = Some(value);
            }
            continue;
        }

        let slot = slot(&mut metadata, field);
        if slot == NOT_AVAILABLE && !value.is_empty() {
            *slot = value;
        }
    }

    if metadata.cusa == NOT_AVAILABLE {
        let text: String = document.root_element().text().collect();
        if let Some(found) = CUSA_ID.find(&text) {
            metadata.cusa = found.as_str().to_string();
        }
    }

    let size = size.unwrap_or_else(|| previous_size.to_string());
    metadata.size = size.clone();

    DetailPage {
        size,
        metadata,
        download_page: find_download_page(&document),
    }
}

/// The anchor wrapping the "Download" button image, else the first anchor
/// pointing at a download-page slug.
fn find_download_page(document: &Html) -> Option<String> {
    let button = document
        .select(&ANCHOR)
        .find(|a| a.select(&DOWNLOAD_IMAGE).next().is_some());

    let anchor = button.or_else(|| {
        document.select(&ANCHOR).find(|a| {
            a.value()
                .attr("href")
                .is_some_and(|href| href.contains(DOWNLOAD_PAGE_MARKER))
        })
    })?;

    anchor
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}
