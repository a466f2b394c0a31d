//! Cache-aside orchestration of the scraping pipeline.
//!
//! A details request is answered from the link cache when a valid record
//! exists. Otherwise the detail page and then the download page are fetched
//! and parsed in sequence, the surviving links are cached, and the result is
//! returned. Failures along the way are logged and surface only as an empty
//! result.

mod runner;
mod types;

pub use runner::LinkOrchestrator;
pub use types::{DetailsSource, ItemDetails, Resolution};
