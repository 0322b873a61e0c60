// src/progress.rs

//! Live progress reporting.
//!
//! The crawl loop notifies an observer after each unit of work; the console
//! implementation redraws an overwritten status block. Purely observational,
//! nothing else depends on it.

use std::io::{self, Write};
use std::sync::Mutex;

/// Snapshot handed to the observer after each unit of work.
#[derive(Debug, Clone, Default)]
pub struct ProgressUpdate {
    /// Accumulated normalized bytes per language tag, in tag order
    pub tag_bytes: Vec<(String, usize)>,

    /// Current unit of work, `user -> repo` or `-` when between repositories
    pub current: String,

    /// Usernames still pending in the frontier
    pub remaining: usize,
}

/// Observer invoked by the crawl loop.
pub trait ProgressObserver: Send + Sync {
    /// Called after each unit of work.
    fn update(&self, update: &ProgressUpdate);

    /// Called once when the run enters Finishing.
    fn finish(&self, remaining: &[String]);
}

/// Observer that reports nothing. Used by tests and `--quiet`.
pub struct NullProgress;

impl ProgressObserver for NullProgress {
    fn update(&self, _update: &ProgressUpdate) {}
    fn finish(&self, _remaining: &[String]) {}
}

/// Console observer drawing an in-place status block with ANSI cursor moves.
#[derive(Default)]
pub struct ConsoleProgress {
    // Lines drawn by the previous update, to be erased before redrawing.
    drawn_lines: Mutex<usize>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressObserver for ConsoleProgress {
    fn update(&self, update: &ProgressUpdate) {
        let mut drawn = self.drawn_lines.lock().unwrap();

        let mut block = String::new();
        for _ in 0..*drawn {
            block.push_str("\x1B[F\x1B[2K");
        }
        for (tag, bytes) in &update.tag_bytes {
            block.push_str(&format!("{tag}:\t{bytes} bytes of code (normalized)\n"));
        }
        block.push_str(&format!("\nCurrently scraping: {}\n", update.current));
        block.push_str(&format!(
            "Remaining users found for scraping: {}\n",
            update.remaining
        ));
        block.push_str("\x1B[1m[Press ctrl+C to finish]\x1B[0m\n");

        *drawn = update.tag_bytes.len() + 4;

        let mut stdout = io::stdout();
        let _ = stdout.write_all(block.as_bytes());
        let _ = stdout.flush();
    }

    fn finish(&self, remaining: &[String]) {
        let mut stdout = io::stdout();
        let _ = writeln!(stdout);
        if !remaining.is_empty() {
            let _ = writeln!(stdout, "Remaining unscraped users: {}", remaining.join(", "));
        }
        let _ = stdout.flush();
    }
}
