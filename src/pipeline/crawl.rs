// src/pipeline/crawl.rs

//! The crawl loop: Running until the frontier drains or cancellation fires,
//! then Finishing (checkpoint + corpus flush).

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::corpus::CorpusBuffer;
use crate::error::Result;
use crate::frontier::Frontier;
use crate::models::Config;
use crate::progress::{ProgressObserver, ProgressUpdate};
use crate::services::{self, ArchiveSampler};
use crate::storage::{Checkpoint, CorpusStorage};
use crate::utils::http::Transport;

/// Summary of a crawl run.
#[derive(Debug, Default)]
pub struct CrawlStats {
    pub users_processed: usize,
    pub repos_sampled: usize,
    pub repos_skipped: usize,
    pub files_sampled: usize,
    pub bytes_collected: usize,
    pub tag_count: usize,
}

/// Run the crawler until the frontier drains or `cancelled` is set.
///
/// Work proceeds strictly sequentially: expansion and listing for one
/// username complete before the next is popped, and no two network
/// operations overlap. Finishing always runs, so the checkpoint is written
/// and the corpus flushed on every clean exit.
pub async fn run_crawler(
    config: &Config,
    transport: &dyn Transport,
    storage: &dyn CorpusStorage,
    progress: &dyn ProgressObserver,
    seeds: &[String],
    cancelled: &AtomicBool,
) -> Result<CrawlStats> {
    let restored = match storage.load_checkpoint().await {
        Ok(checkpoint) => checkpoint,
        Err(e) => {
            log::warn!("Checkpoint load failed: {e}. Starting fresh.");
            Checkpoint::default()
        }
    };
    log::info!(
        "Restored checkpoint: {} visited, {} pending",
        restored.visited.len(),
        restored.frontier.len()
    );

    let mut frontier = Frontier::restore(restored);
    for seed in seeds {
        frontier.push(seed.clone());
    }

    let mut corpus = CorpusBuffer::new();
    let mut stats = CrawlStats::default();
    let sampler = ArchiveSampler::new(transport, &config.limits);
    let delay = Duration::from_millis(config.crawler.request_delay_ms);

    // Running
    'running: while !cancelled.load(Ordering::SeqCst) {
        let Some(user) = frontier.pop() else {
            break;
        };
        progress.update(&snapshot(&corpus, "-", frontier.pending_len()));

        match services::follows::fetch_following(transport, &config.github.base_url, &user).await {
            Ok(found) => {
                for candidate in found {
                    frontier.push(candidate);
                }
            }
            Err(e) => log::warn!("Skipping follow expansion for {user}: {e}"),
        }

        let repos =
            match services::repos::list_repositories(transport, &config.github, &user).await {
                Ok(repos) => repos,
                Err(e) => {
                    log::warn!("Skipping repository listing for {user}: {e}");
                    Vec::new()
                }
            };

        for repo in repos {
            if cancelled.load(Ordering::SeqCst) {
                // Abandon the in-flight account; partial data stays as-is.
                break 'running;
            }
            progress.update(&snapshot(&corpus, &repo.label(), frontier.pending_len()));

            match sampler.sample(&repo, &mut corpus).await {
                Ok(outcome) => {
                    stats.repos_sampled += 1;
                    stats.files_sampled += outcome.files;
                }
                Err(e) => {
                    stats.repos_skipped += 1;
                    log::debug!("Skipping {}: {e}", repo.label());
                }
            }

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        stats.users_processed += 1;
    }

    // Finishing
    let mut checkpoint = frontier.into_checkpoint();
    checkpoint.frontier.shuffle(&mut rand::thread_rng());
    progress.finish(&checkpoint.frontier);

    if let Err(e) = storage.write_checkpoint(&checkpoint).await {
        log::error!("Checkpoint write failed: {e}");
    }

    for (tag, text) in corpus.iter() {
        match storage.append_corpus(tag, text).await {
            Ok(()) => log::info!(
                "{} LOC / {} bytes written for tag {tag}",
                text.matches('\n').count(),
                text.len()
            ),
            Err(e) => log::error!("Corpus write failed for tag {tag}: {e}"),
        }
    }

    stats.bytes_collected = corpus.total_bytes();
    stats.tag_count = corpus.tag_count();
    Ok(stats)
}

fn snapshot(corpus: &CorpusBuffer, current: &str, remaining: usize) -> ProgressUpdate {
    ProgressUpdate {
        tag_bytes: corpus.tag_totals(),
        current: current.to_string(),
        remaining,
    }
}
