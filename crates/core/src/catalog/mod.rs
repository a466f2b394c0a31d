//! Catalog domain types shared by the parsers, the cache and the orchestrator.
//!
//! A catalog item is identified by the canonical URL of its detail page.
//! Every optional text field on the site is represented by the `"N/A"`
//! placeholder rather than an empty string, so cached records round-trip
//! unchanged through the JSON file.

mod types;

pub use types::*;
