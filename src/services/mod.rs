// src/services/mod.rs

//! Crawl services: social graph expansion, repository listing, and archive
//! sampling.

pub mod archives;
pub mod follows;
pub mod repos;

pub use archives::{ArchiveSampler, SampleOutcome};
