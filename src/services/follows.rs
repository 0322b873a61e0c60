// src/services/follows.rs

//! Social graph expansion.
//!
//! Fetches an account's "following" tab and extracts the usernames it links
//! to. Transport failure surfaces as `SourceUnavailable`; the crawl loop
//! treats that as an empty result.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::utils::http::Transport;

/// Platform handle grammar: lowercase letters and hyphens, at least two
/// characters, no leading or trailing hyphen.
fn handle_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^/[a-z]([a-z-]*[a-z])$").expect("valid handle pattern"))
}

/// Fetch the accounts a user follows.
///
/// Returns usernames deduplicated in page insertion order; ordering is not
/// guaranteed stable across calls.
pub async fn fetch_following(
    transport: &dyn Transport,
    base_url: &str,
    user: &str,
) -> Result<Vec<String>> {
    let url = format!("{base_url}/{user}?tab=following");
    let html = transport
        .get_text(&url)
        .await
        .map_err(|e| AppError::source_unavailable(format!("following page for {user}"), e))?;
    parse_following(&html)
}

/// Extract followed usernames from a following-tab page.
fn parse_following(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let anchor_sel = parse_selector("a[href]")?;
    let name_sel = parse_selector(r#"span[class*="Link--secondary"]"#)?;

    let mut seen = HashSet::new();
    let mut users = Vec::new();
    for anchor in document.select(&anchor_sel) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !handle_pattern().is_match(href) {
            continue;
        }
        for span in anchor.select(&name_sel) {
            let text: String = span.text().collect();
            let name = text.trim();
            if name.is_empty() {
                continue;
            }
            if seen.insert(name.to_string()) {
                users.push(name.to_string());
            }
        }
    }
    Ok(users)
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
