// src/models/mod.rs

//! Domain models for the crawler application.

mod config;

// Re-export all public types
pub use config::{Config, CrawlerConfig, GithubConfig, LimitsConfig, OutputConfig};

/// A repository discovered on an account's listing page.
///
/// Derived per Repository Lister call and never persisted; the archive URL
/// points at the configured default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// Account that owns the repository
    pub owner: String,

    /// Repository name as it appears in the listing link
    pub name: String,

    /// Full archive download URL
    pub archive_url: String,
}

impl RepoRef {
    /// Label used for progress display and log context, `owner -> name`.
    pub fn label(&self) -> String {
        format!("{} -> {}", self.owner, self.name)
    }
}
