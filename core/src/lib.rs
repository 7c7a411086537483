pub mod config;
pub mod corpus;
pub mod dom;
pub mod index;
pub mod latest_comments;
pub mod menu;
pub mod modal;
pub mod page_views;
pub mod query;
pub mod render;
pub mod share;
pub mod tokenizer;
pub mod widget;

pub use config::SiteConfig;
pub use corpus::{Corpus, DocId, Document, FeedSource, FileFeed, HttpFeed, StaticFeed};
pub use index::{build_index, Field, Hit, IndexOptions, SearchIndex, TermId};
pub use widget::{IndexState, SearchElements, SearchWidget, WidgetError};
