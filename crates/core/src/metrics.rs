//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Page fetches (search, detail and download pages)
//! - The link cache (lookups, writes)
//! - Detail resolution outcomes

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

// =============================================================================
// Fetch Metrics
// =============================================================================

/// Page fetches total by page kind and result.
pub static PAGE_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pkgscout_page_fetches_total", "Total catalog page fetches"),
        &["page", "result"], // page: "search", "detail", "download"; result: "success", "error"
    )
    .unwrap()
});

/// Fetch duration in seconds by page kind.
pub static FETCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "pkgscout_fetch_duration_seconds",
            "Duration of catalog page fetches",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0, 30.0]),
        &["page"],
    )
    .unwrap()
});

// =============================================================================
// Cache Metrics
// =============================================================================

/// Cache lookups by result.
pub static CACHE_LOOKUPS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pkgscout_cache_lookups_total", "Total link cache lookups"),
        &["result"], // "hit", "miss"
    )
    .unwrap()
});

/// Cache file writes by result.
pub static CACHE_WRITES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pkgscout_cache_writes_total", "Total link cache writes"),
        &["result"], // "ok", "error"
    )
    .unwrap()
});

// =============================================================================
// Orchestrator Metrics
// =============================================================================

/// Detail requests by outcome.
pub static DETAILS_RESOLVED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "pkgscout_details_resolved_total",
            "Total detail requests by outcome",
        ),
        &["outcome"], // "cached", "resolved", "empty"
    )
    .unwrap()
});

/// Links surviving the filter per live resolution.
pub static LINKS_EXTRACTED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "pkgscout_links_extracted",
            "Number of download links extracted per live resolution",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
    )
    .unwrap()
});

/// Get all core metrics for registration.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Fetch
        Box::new(PAGE_FETCHES.clone()),
        Box::new(FETCH_DURATION.clone()),
        // Cache
        Box::new(CACHE_LOOKUPS.clone()),
        Box::new(CACHE_WRITES.clone()),
        // Orchestrator
        Box::new(DETAILS_RESOLVED.clone()),
        Box::new(LINKS_EXTRACTED.clone()),
    ]
}
