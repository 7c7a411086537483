use crate::dom::Element;
use anyhow::{bail, Result};
use serde_json::Value;
use std::collections::HashMap;

pub const IDENTIFIER_ATTR: &str = "data-ga-identifier";

/// View counters next to posts, filled from the page-views API in one request.
pub struct PageViews {
    client: reqwest::Client,
    endpoint: String,
    counters: Vec<Element>,
}

impl PageViews {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, counters: Vec<Element>) -> Self {
        Self { client, endpoint: endpoint.into(), counters }
    }

    /// Identifiers of all counters, in page order.
    pub fn identifiers(&self) -> Vec<String> {
        self.counters.iter().filter_map(|c| c.attr(IDENTIFIER_ATTR)).collect()
    }

    pub async fn fetch(&self) -> Result<HashMap<String, Value>> {
        let ids = self.identifiers();
        let params: Vec<(&str, &str)> = ids.iter().map(|id| ("url[]", id.as_str())).collect();
        let resp = self.client.get(&self.endpoint).query(&params).send().await?;
        if !resp.status().is_success() {
            bail!("page views request failed with {}", resp.status());
        }
        Ok(resp.json().await?)
    }

    /// Write counts into matching counters. Identifiers missing from `counts`
    /// keep their current text; a `null` count clears it. Returns how many
    /// counters were updated.
    pub fn apply(&self, counts: &HashMap<String, Value>) -> usize {
        let mut updated = 0;
        for counter in &self.counters {
            let Some(id) = counter.attr(IDENTIFIER_ATTR) else { continue };
            let text = match counts.get(&id) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                Some(Value::Bool(b)) => b.to_string(),
                Some(Value::Null) => String::new(),
                Some(Value::Array(_) | Value::Object(_)) | None => continue,
            };
            counter.set_text(text);
            updated += 1;
        }
        updated
    }

    /// Fetch and apply. Failures leave the counters alone.
    pub async fn refresh(&self) -> usize {
        match self.fetch().await {
            Ok(counts) => self.apply(&counts),
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "page views unavailable");
                0
            }
        }
    }
}
