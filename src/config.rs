use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Scraper configuration. Only the caller-side pipeline is configurable; the
/// extraction core works from fixed selector and unit tables.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ScraperConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Settings for the HTTP fetch collaborator
#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// User agent sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Caller-level checks applied to an extracted recipe before it is stored
#[derive(Debug, Deserialize, Clone)]
pub struct ValidationConfig {
    /// Titles shorter than this (in characters) are rejected as incomplete
    #[serde(default = "default_min_title_length")]
    pub min_title_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_title_length: default_min_title_length(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_min_title_length() -> usize {
    1
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCRAPE__ prefix
    /// 2. recipe-scrape.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SCRAPE__FETCH__TIMEOUT_SECS
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("recipe-scrape").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_SCRAPE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
