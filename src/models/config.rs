//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Platform endpoints and URL construction
    #[serde(default)]
    pub github: GithubConfig,

    /// Byte ceilings bounding memory growth
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Corpus output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if let Err(e) = url::Url::parse(&self.github.base_url) {
            return Err(AppError::validation(format!(
                "github.base_url is not a valid URL: {e}"
            )));
        }
        if self.github.default_branch.trim().is_empty() {
            return Err(AppError::validation("github.default_branch is empty"));
        }
        if self.limits.max_archive_bytes == 0 {
            return Err(AppError::validation("limits.max_archive_bytes must be > 0"));
        }
        if self.limits.repo_tag_quota_bytes == 0 {
            return Err(AppError::validation(
                "limits.repo_tag_quota_bytes must be > 0",
            ));
        }
        if self.output.corpus_prefix.trim().is_empty() {
            return Err(AppError::validation("output.corpus_prefix is empty"));
        }
        Ok(())
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay between requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Platform endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Base URL of the platform (overridable for testing)
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Branch name used when constructing archive download URLs.
    ///
    /// A single fixed branch is assumed for every repository; repositories
    /// whose default branch differs fail to download like any other
    /// unavailable archive.
    #[serde(default = "defaults::default_branch")]
    pub default_branch: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            default_branch: defaults::default_branch(),
        }
    }
}

/// Byte ceilings for archive download and per-repository sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Archives reporting a content length above this are never downloaded
    #[serde(default = "defaults::max_archive_bytes")]
    pub max_archive_bytes: u64,

    /// Per-repository, per-tag sample budget
    #[serde(default = "defaults::repo_tag_quota_bytes")]
    pub repo_tag_quota_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_archive_bytes: defaults::max_archive_bytes(),
            repo_tag_quota_bytes: defaults::repo_tag_quota_bytes(),
        }
    }
}

/// Corpus output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output files are named `{corpus_prefix}.{tag}`
    #[serde(default = "defaults::corpus_prefix")]
    pub corpus_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            corpus_prefix: defaults::corpus_prefix(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; codecorpus/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        100
    }

    // Platform defaults
    pub fn base_url() -> String {
        "https://github.com".into()
    }
    pub fn default_branch() -> String {
        "master".into()
    }

    // Limit defaults
    pub fn max_archive_bytes() -> u64 {
        4 * 1024 * 1024
    }
    pub fn repo_tag_quota_bytes() -> usize {
        512 * 1024
    }

    // Output defaults
    pub fn corpus_prefix() -> String {
        "corpus".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.crawler.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_base_url() {
        let mut config = Config::default();
        config.github.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_archive_ceiling() {
        let mut config = Config::default();
        config.limits.max_archive_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_ceilings_match_expected() {
        let config = Config::default();
        assert_eq!(config.limits.max_archive_bytes, 4 * 1024 * 1024);
        assert_eq!(config.limits.repo_tag_quota_bytes, 512 * 1024);
        assert_eq!(config.github.default_branch, "master");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[github]\ndefault_branch = \"main\"").unwrap();
        assert_eq!(config.github.default_branch, "main");
        assert_eq!(config.github.base_url, "https://github.com");
        assert_eq!(config.output.corpus_prefix, "corpus");
    }
}
