//! Types for the link orchestrator.

use serde::{Deserialize, Serialize};

use crate::catalog::{DetailMetadata, DownloadLink};

/// Terminal state of a details request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// Links were found (live or cached).
    Resolved,
    /// No links were found. Covers both genuine absence and fetch failure.
    ResolvedEmpty,
}

/// Where a resolved result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailsSource {
    Cache,
    Live,
}

/// Result of a details request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub status: Resolution,
    pub source: DetailsSource,
    /// Best known size: parsed, cached, or the caller's hint.
    pub size: String,
    pub metadata: DetailMetadata,
    pub links: Vec<DownloadLink>,
}

impl ItemDetails {
    pub(crate) fn empty(size: String, metadata: DetailMetadata) -> Self {
        Self {
            status: Resolution::ResolvedEmpty,
            source: DetailsSource::Live,
            size,
            metadata,
            links: Vec::new(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.status == Resolution::Resolved
    }
}
