use crate::index::IndexOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Where the site lives and how the widgets talk to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub feed_path: String,
    pub page_views_path: String,
    pub latest_comments_path: String,
    pub title_boost: f32,
    pub request_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".into(),
            feed_path: "/search_data.json".into(),
            page_views_path: "/api/page-views/".into(),
            latest_comments_path: "/api/latest-comments/".into(),
            title_boost: IndexOptions::default().title_boost,
            request_timeout_secs: 12,
        }
    }
}

impl SiteConfig {
    /// Defaults, overlaid by the JSON file at `path` if given, then by
    /// `SITEKIT_BASE_URL` / `SITEKIT_TITLE_BOOST`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => {
                let text = std::fs::read_to_string(p).with_context(|| format!("reading config {}", p.display()))?;
                serde_json::from_str(&text).with_context(|| format!("parsing config {}", p.display()))?
            }
            None => Self::default(),
        };
        cfg.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup("SITEKIT_BASE_URL") {
            self.base_url = url;
        }
        if let Some(boost) = lookup("SITEKIT_TITLE_BOOST") {
            self.title_boost = boost.trim().parse().with_context(|| format!("SITEKIT_TITLE_BOOST={boost} is not a number"))?;
        }
        Ok(())
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    pub fn feed_url(&self) -> String { self.endpoint(&self.feed_path) }
    pub fn page_views_url(&self) -> String { self.endpoint(&self.page_views_path) }
    pub fn latest_comments_url(&self) -> String { self.endpoint(&self.latest_comments_path) }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions { title_boost: self.title_boost, ..IndexOptions::default() }
    }

    pub fn http_client(&self) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("sitekit/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()?;
        Ok(client)
    }
}
