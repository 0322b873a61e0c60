// src/services/archives.rs

//! Archive sampling.
//!
//! Downloads a repository archive (size-gated by a HEAD request first),
//! enumerates its entries, and feeds normalized text for recognized source
//! files into the corpus buffer under a per-repository quota.

use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::corpus::{CorpusBuffer, RepoQuota, grammar, normalize};
use crate::error::{AppError, Result};
use crate::models::{LimitsConfig, RepoRef};
use crate::utils::http::Transport;

/// Result of sampling one repository.
#[derive(Debug, Default)]
pub struct SampleOutcome {
    /// Entries whose text reached the corpus
    pub files: usize,
    /// Normalized bytes appended to the corpus
    pub bytes: usize,
}

/// Samples repository archives into a corpus buffer.
pub struct ArchiveSampler<'a> {
    transport: &'a dyn Transport,
    limits: &'a LimitsConfig,
}

impl<'a> ArchiveSampler<'a> {
    pub fn new(transport: &'a dyn Transport, limits: &'a LimitsConfig) -> Self {
        Self { transport, limits }
    }

    /// Download and extract one repository archive.
    ///
    /// Every failure is scoped to this repository; the caller logs and moves
    /// on. An archive whose reported content length is missing or above the
    /// ceiling is never downloaded.
    pub async fn sample(&self, repo: &RepoRef, corpus: &mut CorpusBuffer) -> Result<SampleOutcome> {
        let label = repo.label();

        let length = self
            .transport
            .content_length(&repo.archive_url)
            .await
            .map_err(|e| AppError::source_unavailable(label.clone(), e))?
            .ok_or_else(|| AppError::source_unavailable(label.clone(), "no content length"))?;

        if length > self.limits.max_archive_bytes {
            return Err(AppError::size_limit(
                label,
                self.limits.max_archive_bytes,
                length,
            ));
        }

        let body = self
            .transport
            .get_bytes(&repo.archive_url)
            .await
            .map_err(|e| AppError::source_unavailable(label.clone(), e))?;

        self.extract(&label, &body, corpus)
    }

    /// Walk archive entries, normalizing and accumulating matching files.
    fn extract(&self, label: &str, body: &[u8], corpus: &mut CorpusBuffer) -> Result<SampleOutcome> {
        let mut archive = ZipArchive::new(Cursor::new(body))
            .map_err(|e| AppError::decode(label.to_string(), e))?;

        let mut quota = RepoQuota::new(self.limits.repo_tag_quota_bytes);
        let mut outcome = SampleOutcome::default();

        for index in 0..archive.len() {
            let Ok(mut entry) = archive.by_index(index) else {
                // Unreadable entry; skip it, keep the rest.
                continue;
            };
            if entry.is_dir() {
                continue;
            }
            let Some(tag) = grammar::match_tag(entry.name()) else {
                continue;
            };
            if quota.exhausted(tag) {
                continue;
            }

            let mut raw = Vec::new();
            if entry.read_to_end(&mut raw).is_err() {
                continue;
            }

            let text = normalize(&raw);
            quota.charge(tag, text.len());
            corpus.append(tag, &text);
            outcome.files += 1;
            outcome.bytes += text.len();
        }

        Ok(outcome)
    }
}
