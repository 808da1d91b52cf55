use crate::config::types::{ApiConfig, Config, SearchConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Largest page the service will return for a listing
const MAX_PAGE_SIZE: u32 = 200;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_search_config(&config.search)?;
    Ok(())
}

/// Validates API and throttling configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' cannot carry a path",
            config.base_url
        )));
    }

    if config.rate_limit_cooldown_ms < 1 {
        return Err(ConfigError::Validation(
            "rate_limit_cooldown_ms must be >= 1".to_string(),
        ));
    }

    if config.rate_limit_statuses.is_empty() {
        return Err(ConfigError::Validation(
            "rate_limit_statuses cannot be empty".to_string(),
        ));
    }

    for status in &config.rate_limit_statuses {
        if !(400..=599).contains(status) {
            return Err(ConfigError::Validation(format!(
                "rate limit status must be an error status (400-599), got {}",
                status
            )));
        }
    }

    if let Some(size) = config.page_size {
        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(ConfigError::Validation(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, size
            )));
        }
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ConfigError::Validation(format!(
            "user agent name must contain only alphanumeric characters, hyphens and underscores, got '{}'",
            config.name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates the search parameters
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.platform.trim().is_empty() {
        return Err(ConfigError::Validation(
            "platform must be set (in [search] or with --platform)".to_string(),
        ));
    }

    if config.min_minutes >= 60 {
        return Err(ConfigError::Validation(format!(
            "min_minutes must be below 60, got {}",
            config.min_minutes
        )));
    }

    for name in config
        .include_genres
        .iter()
        .chain(config.exclude_genres.iter())
    {
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "genre names cannot be empty".to_string(),
            ));
        }
    }

    for name in &config.include_genres {
        if config.exclude_genres.contains(name) {
            tracing::warn!(
                "Genre '{}' is both included and excluded; it will be included",
                name
            );
        }
    }

    Ok(())
}
