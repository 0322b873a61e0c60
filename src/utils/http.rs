// src/utils/http.rs

//! HTTP transport capability.
//!
//! All network access goes through the [`Transport`] trait so the crawl
//! pipeline and services can be exercised against stub implementations.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CrawlerConfig;

/// Blocking-style HTTP capability: fetch a page, fetch raw bytes, or learn a
/// resource's content length. Every call either completes or fails; there are
/// no retries at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET a URL and return its body as text.
    async fn get_text(&self, url: &str) -> Result<String>;

    /// GET a URL and return its body as raw bytes.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>>;

    /// HEAD a URL and return its Content-Length, if the server reports one.
    async fn content_length(&self, url: &str) -> Result<Option<u64>>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a configured transport.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn content_length(&self, url: &str) -> Result<Option<u64>> {
        let response = self.client.head(url).send().await?.error_for_status()?;
        Ok(response.content_length())
    }
}

#[cfg(test)]
pub mod testing {
    //! Stub transport and fixtures shared across test modules.

    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::Transport;
    use crate::error::{AppError, Result};

    /// In-memory transport keyed by URL. Unknown URLs fail like a dead
    /// endpoint; every GET is recorded so tests can assert what was fetched.
    #[derive(Default)]
    pub struct StubTransport {
        pages: HashMap<String, String>,
        bodies: HashMap<String, Vec<u8>>,
        lengths: HashMap<String, Option<u64>>,
        gets: Mutex<Vec<String>>,
    }

    impl StubTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serve an HTML page for a URL.
        pub fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        /// Serve an archive body for a URL, reporting its actual length on
        /// HEAD.
        pub fn with_archive(mut self, url: &str, body: Vec<u8>) -> Self {
            self.lengths
                .insert(url.to_string(), Some(body.len() as u64));
            self.bodies.insert(url.to_string(), body);
            self
        }

        /// Report a HEAD content length without serving a body.
        pub fn with_length(mut self, url: &str, length: Option<u64>) -> Self {
            self.lengths.insert(url.to_string(), length);
            self
        }

        /// URLs fetched with GET so far.
        pub fn get_log(&self) -> Vec<String> {
            self.gets.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for StubTransport {
        async fn get_text(&self, url: &str) -> Result<String> {
            self.gets.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::source_unavailable(url, "no stub page"))
        }

        async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
            self.gets.lock().unwrap().push(url.to_string());
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| AppError::source_unavailable(url, "no stub body"))
        }

        async fn content_length(&self, url: &str) -> Result<Option<u64>> {
            self.lengths
                .get(url)
                .copied()
                .ok_or_else(|| AppError::source_unavailable(url, "no stub head"))
        }
    }

    /// Build an in-memory zip archive from (name, bytes) entries.
    pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, bytes) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }
}
