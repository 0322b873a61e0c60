// src/services/repos.rs

//! Repository listing.
//!
//! Fetches an account's "repositories" tab and turns each repository link
//! into a [`RepoRef`] with a constructed archive download URL.

use std::collections::HashSet;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{GithubConfig, RepoRef};
use crate::utils::http::Transport;

/// List an account's repositories as archive download candidates.
///
/// The archive URL targets the configured branch for every repository;
/// repositories whose default branch differs will fail at the fetch step
/// like any other unavailable archive.
pub async fn list_repositories(
    transport: &dyn Transport,
    github: &GithubConfig,
    user: &str,
) -> Result<Vec<RepoRef>> {
    let url = format!("{}/{user}?tab=repositories", github.base_url);
    let html = transport
        .get_text(&url)
        .await
        .map_err(|e| AppError::source_unavailable(format!("repository page for {user}"), e))?;
    parse_repositories(&html, github, user)
}

/// Extract repository references from a repositories-tab page.
fn parse_repositories(html: &str, github: &GithubConfig, user: &str) -> Result<Vec<RepoRef>> {
    let document = Html::parse_document(html);
    let anchor_sel = parse_selector("a[href]")?;
    let href_pattern = repo_href_pattern(user)?;

    let mut seen = HashSet::new();
    let mut repos = Vec::new();
    for anchor in document.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href_pattern.is_match(href) {
            continue;
        }
        if !seen.insert(href.to_string()) {
            continue;
        }
        let name = href.rsplit('/').next().unwrap_or_default().to_string();
        let archive_url = format!(
            "{}{href}/archive/refs/heads/{}.zip",
            github.base_url, github.default_branch
        );
        repos.push(RepoRef {
            owner: user.to_string(),
            name,
            archive_url,
        });
    }
    Ok(repos)
}

/// Pattern for repository links under the given account: `/<owner>/<name>`.
fn repo_href_pattern(user: &str) -> Result<Regex> {
    let pattern = format!(r"^/{}/[\w.\-]+$", regex::escape(user));
    Regex::new(&pattern).map_err(|e| AppError::config(format!("repo pattern: {e}")))
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
