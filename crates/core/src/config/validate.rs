use reqwest::Url;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Scraper base URL is an absolute http(s) URL and timeout is positive
/// - Cache TTLs are positive
/// - Server port and rate limit are not 0
/// - Resolver, when present, has an API key
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Scraper validation
    let base_url = Url::parse(&config.scraper.base_url).map_err(|e| {
        ConfigError::ValidationError(format!(
            "scraper.base_url '{}' is not a valid URL: {}",
            config.scraper.base_url, e
        ))
    })?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ConfigError::ValidationError(format!(
            "scraper.base_url must use http or https, got '{}'",
            base_url.scheme()
        )));
    }
    if config.scraper.timeout == 0 {
        return Err(ConfigError::ValidationError(
            "scraper.timeout cannot be 0".to_string(),
        ));
    }

    // Cache validation
    if config.database.cache_ttl == 0 {
        return Err(ConfigError::ValidationError(
            "database.cache_ttl cannot be 0".to_string(),
        ));
    }
    if config.database.memory_ttl == 0 {
        return Err(ConfigError::ValidationError(
            "database.memory_ttl cannot be 0".to_string(),
        ));
    }

    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }
    if config.server.requests_per_minute == 0 {
        return Err(ConfigError::ValidationError(
            "server.requests_per_minute cannot be 0".to_string(),
        ));
    }

    if let Some(resolver) = &config.resolver {
        if resolver.api_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "resolver.api_key cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
