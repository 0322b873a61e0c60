//! codecorpus CLI
//!
//! Walks the follow graph outward from the seed accounts, sampling source
//! files from each account's repository archives into per-language corpus
//! files. Press Ctrl-C to finish early; visited and pending accounts are
//! checkpointed so the next run picks up where this one stopped.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use codecorpus::{
    error::Result,
    models::Config,
    pipeline,
    progress::{ConsoleProgress, NullProgress, ProgressObserver},
    storage::LocalStorage,
    utils::http::HttpTransport,
};

/// codecorpus - GitHub code corpus crawler
#[derive(Parser, Debug)]
#[command(
    name = "codecorpus",
    version,
    about = "Crawls public GitHub accounts to build per-language code corpora"
)]
struct Cli {
    /// Seed usernames to start crawling from (the checkpoint alone may
    /// supply work, so zero seeds is valid)
    seeds: Vec<String>,

    /// Path to storage directory containing config and checkpoint files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the live progress display
    #[arg(short, long)]
    quiet: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("codecorpus crawler starting...");

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    config.validate()?;

    std::fs::create_dir_all(&cli.storage_dir)?;
    let transport = HttpTransport::new(&config.crawler)?;
    let storage = LocalStorage::new(&cli.storage_dir, &config.output.corpus_prefix);

    let progress: Box<dyn ProgressObserver> = if cli.quiet {
        Box::new(NullProgress)
    } else {
        Box::new(ConsoleProgress::new())
    };

    // One interrupt transitions the loop to Finishing; the checkpoint is
    // always written on the way out.
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancel_flag = Arc::clone(&cancelled);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_flag.store(true, Ordering::SeqCst);
        }
    });

    let stats = pipeline::run_crawler(
        &config,
        &transport,
        &storage,
        progress.as_ref(),
        &cli.seeds,
        &cancelled,
    )
    .await?;

    log::info!(
        "Processed {} accounts: {} repositories sampled, {} skipped",
        stats.users_processed,
        stats.repos_sampled,
        stats.repos_skipped
    );
    log::info!(
        "Collected {} bytes across {} language tags ({} files)",
        stats.bytes_collected,
        stats.tag_count,
        stats.files_sampled
    );
    log::info!("Done!");

    Ok(())
}
