pub mod cache;
pub mod catalog;
pub mod config;
pub mod fetcher;
pub mod links;
pub mod metrics;
pub mod orchestrator;
pub mod parser;
pub mod resolver;
pub mod testing;

pub use cache::{CacheError, CacheRecord, JsonFileCache, LinkCache, MemoryCache};
pub use catalog::{CatalogSummary, DetailMetadata, DownloadLink, NOT_AVAILABLE};
pub use config::{
    load_config, load_config_from_str, load_config_or_default, validate_config, CacheBackend,
    Config, ConfigError, SanitizedConfig,
};
pub use fetcher::{FetchError, HttpFetcher, PageFetcher, RawPage};
pub use links::{host_label, LinkFilter};
pub use orchestrator::{DetailsSource, ItemDetails, LinkOrchestrator, Resolution};
pub use resolver::{LinkResolver, RealDebridClient, ResolverError, UnrestrictedLink};
