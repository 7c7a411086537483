use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;
use std::path::PathBuf;

pub type DocId = u32;

/// One searchable item of the site feed. `id` is its position in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    category: String,
    url: String,
}

/// Ordered, read-only set of documents loaded from the feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let entries: Vec<FeedEntry> = serde_json::from_slice(bytes).context("feed is not a JSON array of documents")?;
        let docs = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| Document { id: i as DocId, title: e.title, author: e.author, category: e.category, url: e.url })
            .collect();
        Ok(Self { docs })
    }

    pub fn len(&self) -> usize { self.docs.len() }
    pub fn is_empty(&self) -> bool { self.docs.is_empty() }
    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.get(id as usize) }
    pub fn iter(&self) -> std::slice::Iter<'_, Document> { self.docs.iter() }
}

impl Index<DocId> for Corpus {
    type Output = Document;
    fn index(&self, id: DocId) -> &Document { &self.docs[id as usize] }
}

impl FromIterator<(String, String, String, String)> for Corpus {
    /// Builds a corpus from `(title, author, category, url)` tuples, numbering them in order.
    fn from_iter<I: IntoIterator<Item = (String, String, String, String)>>(iter: I) -> Self {
        let docs = iter
            .into_iter()
            .enumerate()
            .map(|(i, (title, author, category, url))| Document { id: i as DocId, title, author, category, url })
            .collect();
        Self { docs }
    }
}

/// Somewhere a corpus can be downloaded from.
pub trait FeedSource: Send + Sync + 'static {
    fn fetch(&self) -> impl std::future::Future<Output = Result<Corpus>> + Send;
    fn describe(&self) -> String;
}

/// Feed served over HTTP; fetched without credentials.
#[derive(Clone)]
pub struct HttpFeed {
    pub client: reqwest::Client,
    pub url: String,
}

impl FeedSource for HttpFeed {
    async fn fetch(&self) -> Result<Corpus> {
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            bail!("feed request to {} failed with {}", self.url, status);
        }
        let bytes = resp.bytes().await?;
        Corpus::from_json(&bytes)
    }

    fn describe(&self) -> String { self.url.clone() }
}

/// Feed read from the local filesystem.
#[derive(Clone)]
pub struct FileFeed {
    pub path: PathBuf,
}

impl FeedSource for FileFeed {
    async fn fetch(&self) -> Result<Corpus> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("reading feed {}", self.path.display()))?;
        Corpus::from_json(&bytes)
    }

    fn describe(&self) -> String { self.path.display().to_string() }
}

/// Corpus already in memory; resolves immediately.
#[derive(Clone)]
pub struct StaticFeed(pub Corpus);

impl FeedSource for StaticFeed {
    async fn fetch(&self) -> Result<Corpus> { Ok(self.0.clone()) }
    fn describe(&self) -> String { format!("static corpus of {} documents", self.0.len()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_ids_by_position() {
        let json = br#"[
            {"title": "First", "author": "Ann", "category": "News", "url": "/first"},
            {"title": "Second", "url": "/second", "date": "2020-01-01"}
        ]"#;
        let corpus = Corpus::from_json(json).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus[1].id, 1);
        assert_eq!(corpus[1].author, "");
        assert_eq!(corpus.get(0).map(|d| d.url.as_str()), Some("/first"));
    }

    #[test]
    fn rejects_non_array_feed() {
        assert!(Corpus::from_json(br#"{"title": "x"}"#).is_err());
    }

    #[tokio::test]
    async fn file_feed_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("search_data.json");
        std::fs::write(&path, r#"[{"title": "Alpha", "url": "/a"}]"#).unwrap();
        let corpus = FileFeed { path }.fetch().await.unwrap();
        assert_eq!(corpus[0].title, "Alpha");
    }

    #[tokio::test]
    async fn file_feed_missing_file_is_error() {
        let feed = FileFeed { path: PathBuf::from("/nonexistent/search_data.json") };
        assert!(feed.fetch().await.is_err());
    }
}
