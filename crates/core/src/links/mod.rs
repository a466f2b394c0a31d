//! Download link post-processing: blocklist filtering, deduplication and
//! display labels.

mod filter;

pub use filter::{host_label, LinkFilter, DEFAULT_IGNORE_DOMAINS};
