use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolver: Option<ResolverConfig>,
}

/// Scraper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScraperConfig {
    /// Root of the catalog site; search pages are `{base_url}?s=<query>`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Extra domain substrings to drop from download links.
    /// Appended to the built-in blocklist, never replacing it.
    #[serde(default)]
    pub ignore_domains: Vec<String>,
    /// Browser fingerprint presented to the site.
    #[serde(default)]
    pub client: ClientProfile,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            ignore_domains: Vec::new(),
            client: ClientProfile::default(),
        }
    }
}

fn default_base_url() -> String {
    "https://www.superpsx.com/".to_string()
}

fn default_timeout() -> u64 {
    15
}

/// Browser identity used to build request headers.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ClientProfile {
    #[serde(default)]
    pub browser: Browser,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub mobile: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[default]
    Windows,
    Macos,
    Linux,
}

/// Cache storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,
    /// Maximum record age in seconds for the persisted cache.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl: u64,
    /// Maximum record age in seconds for the in-memory cache.
    #[serde(default = "default_memory_ttl")]
    pub memory_ttl: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            cache_file: default_cache_file(),
            cache_ttl: default_cache_ttl(),
            memory_ttl: default_memory_ttl(),
        }
    }
}

impl DatabaseConfig {
    /// TTL that applies to the selected backend.
    pub fn effective_ttl(&self) -> u64 {
        match self.backend {
            CacheBackend::File => self.cache_ttl,
            CacheBackend::Memory => self.memory_ttl,
        }
    }
}

fn default_cache_file() -> PathBuf {
    PathBuf::from("games_cache.json")
}

fn default_cache_ttl() -> u64 {
    31_536_000 // one year
}

fn default_memory_ttl() -> u64 {
    14_400 // four hours
}

/// Available cache backends
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    #[default]
    File,
    Memory,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-client budget for the search and details endpoints.
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_requests_per_minute() -> u32 {
    10
}

/// Restricted-link resolver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    pub api_key: String,
    #[serde(default = "default_resolver_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_resolver_timeout")]
    pub timeout: u64,
}

fn default_resolver_url() -> String {
    "https://api.real-debrid.com/rest/1.0".to_string()
}

fn default_resolver_timeout() -> u64 {
    30
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub scraper: ScraperConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolver: Option<SanitizedResolverConfig>,
}

/// Sanitized resolver config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedResolverConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            scraper: config.scraper.clone(),
            database: config.database.clone(),
            server: config.server.clone(),
            resolver: config.resolver.as_ref().map(|r| SanitizedResolverConfig {
                base_url: r.base_url.clone(),
                api_key_configured: !r.api_key.is_empty(),
                timeout: r.timeout,
            }),
        }
    }
}
