use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Longrun
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Remote API and throttling behaviour
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Root of the speedrun.com REST API
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// How long to wait after a rate-limit response before retrying (milliseconds)
    #[serde(rename = "rate-limit-cooldown-ms")]
    pub rate_limit_cooldown_ms: u64,

    /// HTTP statuses the service uses to signal throttling
    #[serde(rename = "rate-limit-statuses")]
    pub rate_limit_statuses: Vec<u16>,

    /// Emit a warning every time a cooldown is entered
    #[serde(rename = "log-throttle")]
    pub log_throttle: bool,

    /// Items per listing page, sent as `max=`
    #[serde(rename = "page-size")]
    pub page_size: Option<u32>,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.rate_limit_cooldown_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.speedrun.com/api/v1".to_string(),
            rate_limit_cooldown_ms: 60_000,
            rate_limit_statuses: vec![420, 429],
            log_throttle: true,
            page_size: None,
            request_timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    pub name: String,

    pub version: String,

    /// URL with information about the tool
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/longrun/longrun".to_string(),
        }
    }
}

/// What to search for
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Platform name, matched exactly against the platform catalog
    pub platform: String,

    #[serde(rename = "min-hours")]
    pub min_hours: u32,

    #[serde(rename = "min-minutes")]
    pub min_minutes: u32,

    /// Only keep games carrying at least one of these genres
    #[serde(rename = "include-genres")]
    pub include_genres: Vec<String>,

    /// Drop games carrying any of these genres
    #[serde(rename = "exclude-genres")]
    pub exclude_genres: Vec<String>,

    /// Only keep games released on this platform alone
    #[serde(rename = "platform-exclusive")]
    pub platform_exclusive: bool,
}

impl SearchConfig {
    /// Threshold a record must strictly exceed to be reported
    pub fn threshold_seconds(&self) -> f64 {
        f64::from(self.min_hours) * 3600.0 + f64::from(self.min_minutes) * 60.0
    }

    pub fn has_genre_filter(&self) -> bool {
        !self.include_genres.is_empty() || !self.exclude_genres.is_empty()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            platform: String::new(),
            min_hours: 2,
            min_minutes: 0,
            include_genres: Vec::new(),
            exclude_genres: Vec::new(),
            platform_exclusive: false,
        }
    }
}
