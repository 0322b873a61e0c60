// src/corpus/mod.rs

//! Corpus building blocks: extension grammar, text normalization, and
//! accumulation buffers.

pub mod buffer;
pub mod grammar;
pub mod normalize;

pub use buffer::{CorpusBuffer, RepoQuota};
pub use grammar::match_tag;
pub use normalize::normalize;
