//! Storage abstractions for checkpoint and corpus persistence.
//!
//! Two kinds of durable state exist:
//! - the checkpoint (visited set + pending frontier), rewritten atomically
//!   once per run at Finishing, and
//! - per-tag corpus output files, appended to at Finishing.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Crawler configuration
//! ├── visited.json          # Every username ever scheduled
//! ├── frontier.json         # Usernames still pending
//! ├── corpus.py             # Per-tag corpus outputs (append-only)
//! └── corpus.md
//! ```

pub mod local;

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStorage;

/// Durable snapshot of crawl state enabling resumable runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkpoint {
    /// Every username ever placed into the frontier or passed as a seed
    pub visited: HashSet<String>,

    /// Usernames discovered but not yet processed
    pub frontier: Vec<String>,
}

/// Trait for crawl persistence backends.
#[async_trait]
pub trait CorpusStorage: Send + Sync {
    /// Load the checkpoint; missing records yield an empty checkpoint.
    async fn load_checkpoint(&self) -> Result<Checkpoint>;

    /// Atomically replace both checkpoint records.
    async fn write_checkpoint(&self, checkpoint: &Checkpoint) -> Result<()>;

    /// Append normalized text to the output file for a tag.
    async fn append_corpus(&self, tag: &str, text: &str) -> Result<()>;
}
