//! Local filesystem storage implementation.

use std::collections::HashSet;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::{Checkpoint, CorpusStorage};

const VISITED_FILE: &str = "visited.json";
const FRONTIER_FILE: &str = "frontier.json";

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    corpus_prefix: String,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>, corpus_prefix: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            corpus_prefix: corpus_prefix.into(),
        }
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Output path for a tag's corpus file.
    fn corpus_path(&self, tag: &str) -> PathBuf {
        self.root_dir.join(format!("{}.{}", self.corpus_prefix, tag))
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl CorpusStorage for LocalStorage {
    async fn load_checkpoint(&self) -> Result<Checkpoint> {
        let visited: HashSet<String> = self
            .read_json::<Vec<String>>(VISITED_FILE)
            .await?
            .map(|names| names.into_iter().collect())
            .unwrap_or_default();
        let frontier: Vec<String> = self
            .read_json(FRONTIER_FILE)
            .await?
            .unwrap_or_default();

        Ok(Checkpoint { visited, frontier })
    }

    async fn write_checkpoint(&self, checkpoint: &Checkpoint) -> Result<()> {
        // Stable ordering keeps the visited record diffable between runs.
        let mut visited: Vec<&String> = checkpoint.visited.iter().collect();
        visited.sort();

        self.write_json(VISITED_FILE, &visited)
            .await
            .map_err(|e| AppError::persistence(VISITED_FILE, e))?;
        self.write_json(FRONTIER_FILE, &checkpoint.frontier)
            .await
            .map_err(|e| AppError::persistence(FRONTIER_FILE, e))?;
        Ok(())
    }

    async fn append_corpus(&self, tag: &str, text: &str) -> Result<()> {
        let path = self.corpus_path(tag);
        self.ensure_dir(&path)
            .await
            .map_err(|e| AppError::persistence(path.display().to_string(), e))?;

        let result = async {
            let mut file = tokio::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&path)
                .await?;
            file.write_all(text.as_bytes()).await?;
            file.flush().await?;
            Ok::<_, std::io::Error>(())
        }
        .await;

        result.map_err(|e| AppError::persistence(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage(tmp: &TempDir) -> LocalStorage {
        LocalStorage::new(tmp.path(), "corpus")
    }

    #[tokio::test]
    async fn missing_checkpoint_is_empty() {
        let tmp = TempDir::new().unwrap();
        let checkpoint = storage(&tmp).load_checkpoint().await.unwrap();
        assert!(checkpoint.visited.is_empty());
        assert!(checkpoint.frontier.is_empty());
    }

    #[tokio::test]
    async fn checkpoint_round_trips_exactly() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        let checkpoint = Checkpoint {
            visited: ["alice", "bob", "carol"]
                .into_iter()
                .map(String::from)
                .collect(),
            frontier: vec!["carol".to_string(), "bob".to_string()],
        };
        storage.write_checkpoint(&checkpoint).await.unwrap();

        let loaded = storage.load_checkpoint().await.unwrap();
        assert_eq!(loaded, checkpoint);
    }

    #[tokio::test]
    async fn rewrite_replaces_previous_checkpoint() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        let first = Checkpoint {
            visited: ["a".to_string()].into_iter().collect(),
            frontier: vec!["a".to_string()],
        };
        storage.write_checkpoint(&first).await.unwrap();

        let second = Checkpoint {
            visited: ["a".to_string(), "b".to_string()].into_iter().collect(),
            frontier: vec![],
        };
        storage.write_checkpoint(&second).await.unwrap();

        let loaded = storage.load_checkpoint().await.unwrap();
        assert_eq!(loaded, second);
    }

    #[tokio::test]
    async fn corpus_appends_across_writes() {
        let tmp = TempDir::new().unwrap();
        let storage = storage(&tmp);

        storage.append_corpus("py", "first\n\n").await.unwrap();
        storage.append_corpus("py", "second\n\n").await.unwrap();
        storage.append_corpus("md", "other\n\n").await.unwrap();

        let py = tokio::fs::read_to_string(tmp.path().join("corpus.py"))
            .await
            .unwrap();
        assert_eq!(py, "first\n\nsecond\n\n");

        let md = tokio::fs::read_to_string(tmp.path().join("corpus.md"))
            .await
            .unwrap();
        assert_eq!(md, "other\n\n");
    }
}
