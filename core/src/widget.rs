//! The search box: loads the feed in the background, then serves form
//! submissions from the resulting index.

use crate::corpus::{Document, FeedSource};
use crate::dom::{Body, Element, ESCAPE_KEY};
use crate::index::{build_index, IndexOptions, SearchIndex};
use crate::render::{render_results, render_unavailable};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone)]
pub enum IndexState {
    Loading,
    Ready(Arc<SearchIndex>),
    Failed(Arc<str>),
}

impl IndexState {
    pub fn is_loading(&self) -> bool { matches!(self, IndexState::Loading) }
}

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("search is unavailable: {0}")]
    Unavailable(Arc<str>),
    #[error("feed loader stopped before producing an index")]
    LoaderGone,
}

/// Elements the search widget drives.
#[derive(Clone, Debug)]
pub struct SearchElements {
    pub overlay: Element,
    pub panel: Element,
    /// The `<ul>` that receives rendered result items.
    pub results: Element,
    pub body: Body,
}

impl SearchElements {
    pub fn new(overlay: Element, body: Body) -> Self {
        Self { overlay, panel: Element::new("search_results"), results: Element::new("search_results ul"), body }
    }
}

pub struct SearchWidget {
    elements: SearchElements,
    state: watch::Receiver<IndexState>,
}

impl SearchWidget {
    /// Start loading `source` on the current tokio runtime. Submissions made
    /// before the load finishes wait for it.
    pub fn initialize<S: FeedSource>(source: S, elements: SearchElements, options: IndexOptions) -> Self {
        let (tx, rx) = watch::channel(IndexState::Loading);
        tokio::spawn(async move {
            let state = match source.fetch().await {
                Ok(corpus) => {
                    tracing::info!(feed = %source.describe(), num_docs = corpus.len(), "search feed loaded");
                    IndexState::Ready(Arc::new(build_index(corpus, options)))
                }
                Err(e) => {
                    tracing::error!(feed = %source.describe(), error = %e, "search feed failed to load");
                    IndexState::Failed(Arc::from(format!("{e:#}")))
                }
            };
            // nobody listening means the widget is gone
            let _ = tx.send(state);
        });
        Self { elements, state: rx }
    }

    /// A widget over an index that is already built.
    pub fn with_index(index: SearchIndex, elements: SearchElements) -> Self {
        let (_tx, rx) = watch::channel(IndexState::Ready(Arc::new(index)));
        Self { elements, state: rx }
    }

    pub fn elements(&self) -> &SearchElements { &self.elements }

    pub fn state(&self) -> IndexState { self.state.borrow().clone() }

    /// Wait until the index is ready or has failed.
    pub async fn ready(&self) -> Result<Arc<SearchIndex>, WidgetError> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(|s| !s.is_loading())
            .await
            .map_err(|_| WidgetError::LoaderGone)?
            .clone();
        match state {
            IndexState::Ready(index) => Ok(index),
            IndexState::Failed(reason) => Err(WidgetError::Unavailable(reason)),
            IndexState::Loading => Err(WidgetError::LoaderGone),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Document>, WidgetError> {
        let index = self.ready().await?;
        Ok(index.search_documents(query).into_iter().cloned().collect())
    }

    pub fn render_results(&self, results: &[&Document]) {
        self.elements.results.set_html(render_results(results).into_string());
    }

    pub fn show_overlay(&self) {
        self.elements.overlay.show();
        self.elements.panel.show();
        self.elements.body.lock_scroll();
    }

    pub fn hide_overlay(&self) {
        self.elements.overlay.hide();
        self.elements.panel.hide();
        self.elements.body.unlock_scroll();
    }

    /// Form submission. The panel opens immediately; results are rendered once
    /// the index is available. If the panel was dismissed in the meantime
    /// nothing is rendered.
    pub async fn submit(&self, query: &str) -> Result<Vec<Document>, WidgetError> {
        self.show_overlay();
        let outcome = self.search(query).await;
        if !self.elements.panel.is_visible() {
            tracing::debug!(query, "panel dismissed before results arrived");
            return outcome;
        }
        match &outcome {
            Ok(docs) => {
                let refs: Vec<&Document> = docs.iter().collect();
                self.render_results(&refs);
            }
            Err(_) => self.elements.results.set_html(render_unavailable().into_string()),
        }
        outcome
    }

    pub fn dismiss(&self) {
        self.hide_overlay();
        self.elements.results.empty();
    }

    pub fn on_overlay_click(&self) { self.dismiss(); }
    pub fn on_close_click(&self) { self.dismiss(); }

    /// Returns whether the key closed the panel.
    pub fn on_keydown(&self, key: u32) -> bool {
        if key == ESCAPE_KEY && self.elements.panel.is_visible() {
            self.dismiss();
            return true;
        }
        false
    }
}
