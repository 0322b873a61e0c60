//! Pipeline entry points for crawler operations.

pub mod crawl;

pub use crawl::{CrawlStats, run_crawler};
