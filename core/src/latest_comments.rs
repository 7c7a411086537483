use crate::dom::Element;
use anyhow::{bail, Result};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Deserialize)]
struct CommentsPayload {
    html: String,
}

/// Sidebar card whose body is server-rendered comment HTML.
pub struct LatestComments {
    client: reqwest::Client,
    endpoint: String,
    container: Element,
    card: Element,
}

impl LatestComments {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, container: Element, card: Element) -> Self {
        Self { client, endpoint: endpoint.into(), container, card }
    }

    pub async fn fetch(&self) -> Result<String> {
        // never served from cache
        let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis().to_string();
        let resp = self.client.get(&self.endpoint).query(&[("_", stamp.as_str())]).send().await?;
        if !resp.status().is_success() {
            bail!("latest comments request failed with {}", resp.status());
        }
        let payload: CommentsPayload = resp.json().await?;
        Ok(payload.html)
    }

    /// Fill the container, or drop the whole card if the comments can't be had.
    pub async fn load(&self) -> bool {
        match self.fetch().await {
            Ok(html) => {
                self.container.set_html(html);
                true
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "removing latest comments card");
                self.card.remove();
                false
            }
        }
    }
}
