// src/corpus/buffer.rs

//! Accumulation buffers: the run-wide corpus and the per-repository quota.

use std::collections::{BTreeMap, HashMap};

/// Run-wide accumulator mapping language tags to normalized text.
///
/// Persists across repositories and accounts for the whole run; flushed to
/// per-tag output files only at Finishing.
#[derive(Debug, Default)]
pub struct CorpusBuffer {
    buffers: BTreeMap<&'static str, String>,
}

impl CorpusBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append normalized text under a tag.
    pub fn append(&mut self, tag: &'static str, text: &str) {
        self.buffers.entry(tag).or_default().push_str(text);
    }

    /// Accumulated bytes for a single tag.
    pub fn bytes_for(&self, tag: &str) -> usize {
        self.buffers.get(tag).map_or(0, |s| s.len())
    }

    /// Total accumulated bytes across all tags.
    pub fn total_bytes(&self) -> usize {
        self.buffers.values().map(|s| s.len()).sum()
    }

    /// Per-tag byte counts, in tag order.
    pub fn tag_totals(&self) -> Vec<(String, usize)> {
        self.buffers
            .iter()
            .map(|(tag, text)| (tag.to_string(), text.len()))
            .collect()
    }

    /// Iterate over (tag, text) pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buffers.iter().map(|(tag, text)| (*tag, text.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    pub fn tag_count(&self) -> usize {
        self.buffers.len()
    }
}

/// Per-repository byte budget, scoped to one extraction pass.
///
/// The budget check happens before an entry's bytes are added, so the final
/// total for a tag may exceed the ceiling by at most one file's length.
#[derive(Debug)]
pub struct RepoQuota {
    ceiling: usize,
    spent: HashMap<&'static str, usize>,
}

impl RepoQuota {
    pub fn new(ceiling: usize) -> Self {
        Self {
            ceiling,
            spent: HashMap::new(),
        }
    }

    /// Whether the tag's budget is already exceeded (strictly above the
    /// ceiling), meaning further entries for it are skipped.
    pub fn exhausted(&self, tag: &str) -> bool {
        self.spent.get(tag).copied().unwrap_or(0) > self.ceiling
    }

    /// Charge bytes against a tag's budget.
    pub fn charge(&mut self, tag: &'static str, bytes: usize) {
        *self.spent.entry(tag).or_insert(0) += bytes;
    }

    /// Bytes charged so far for a tag.
    pub fn spent(&self, tag: &str) -> usize {
        self.spent.get(tag).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_appends_accumulate_per_tag() {
        let mut corpus = CorpusBuffer::new();
        corpus.append("py", "abc\n\n");
        corpus.append("py", "def\n\n");
        corpus.append("md", "ghi\n\n");

        assert_eq!(corpus.bytes_for("py"), 10);
        assert_eq!(corpus.bytes_for("md"), 5);
        assert_eq!(corpus.total_bytes(), 15);
        assert_eq!(corpus.tag_count(), 2);
    }

    #[test]
    fn tag_totals_are_ordered() {
        let mut corpus = CorpusBuffer::new();
        corpus.append("rs", "x");
        corpus.append("md", "y");
        let totals = corpus.tag_totals();
        assert_eq!(totals[0].0, "md");
        assert_eq!(totals[1].0, "rs");
    }

    #[test]
    fn quota_blocks_only_after_ceiling_crossed() {
        let mut quota = RepoQuota::new(100);
        assert!(!quota.exhausted("py"));

        // Exactly at the ceiling is still allowed (check is strict).
        quota.charge("py", 100);
        assert!(!quota.exhausted("py"));

        quota.charge("py", 1);
        assert!(quota.exhausted("py"));
    }

    #[test]
    fn quota_overage_bounded_by_one_charge() {
        let ceiling = 100;
        let mut quota = RepoQuota::new(ceiling);
        let file_len = 60;

        // Simulate the extractor: check first, then charge.
        let mut accepted = 0;
        for _ in 0..10 {
            if quota.exhausted("py") {
                continue;
            }
            quota.charge("py", file_len);
            accepted += 1;
        }

        assert_eq!(accepted, 2);
        assert!(quota.spent("py") <= ceiling + file_len);
    }

    #[test]
    fn quotas_are_independent_per_tag() {
        let mut quota = RepoQuota::new(10);
        quota.charge("py", 50);
        assert!(quota.exhausted("py"));
        assert!(!quota.exhausted("md"));
    }
}
