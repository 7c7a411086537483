use axum::extract::RawQuery;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use sitekit::dom::{Body, Element};
use sitekit::latest_comments::LatestComments;
use sitekit::page_views::{PageViews, IDENTIFIER_ATTR};
use sitekit::{HttpFeed, IndexOptions, SearchElements, SearchWidget, SiteConfig, WidgetError};
use std::collections::HashMap;
use tokio::net::TcpListener;

async fn serve(app: Router) -> SiteConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    SiteConfig { base_url: format!("http://{addr}"), ..SiteConfig::default() }
}

fn query_pairs(raw: Option<String>) -> Vec<(String, String)> {
    url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes()).into_owned().collect()
}

async fn page_views(RawQuery(raw): RawQuery) -> Json<HashMap<String, u64>> {
    let counts = query_pairs(raw)
        .into_iter()
        .filter(|(k, _)| k == "url[]")
        .enumerate()
        .map(|(i, (_, id))| (id, (i as u64 + 1) * 10))
        .collect();
    Json(counts)
}

async fn latest_comments(RawQuery(raw): RawQuery) -> Json<Value> {
    let busted = query_pairs(raw).iter().any(|(k, v)| k == "_" && v.parse::<u128>().is_ok());
    Json(json!({ "html": format!("<ul><li>first!</li></ul><!-- busted={busted} -->") }))
}

fn site() -> Router {
    Router::new()
        .route(
            "/search_data.json",
            get(|| async {
                Json(json!([
                    {"title": "Alpha Widget", "author": "Ann", "category": "Widgets", "url": "/alpha"},
                    {"title": "Beta", "author": "Alpha Team", "category": "Misc", "url": "/beta"}
                ]))
            }),
        )
        .route("/api/page-views/", get(page_views))
        .route("/api/latest-comments/", get(latest_comments))
}

fn broken_site() -> Router {
    Router::new().route("/api/latest-comments/", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
}

#[tokio::test]
async fn http_feed_drives_search() {
    let cfg = serve(site()).await;
    let feed = HttpFeed { client: cfg.http_client().unwrap(), url: cfg.feed_url() };
    let els = SearchElements::new(Element::new("overlay"), Body::new());
    let widget = SearchWidget::initialize(feed, els.clone(), cfg.index_options());

    let docs = widget.submit("alpha").await.unwrap();
    assert_eq!(docs.iter().map(|d| d.url.as_str()).collect::<Vec<_>>(), vec!["/alpha", "/beta"]);
    assert_eq!(els.results.html().matches("<li>").count(), 2);
}

#[tokio::test]
async fn missing_feed_is_unavailable() {
    let cfg = serve(broken_site()).await;
    let feed = HttpFeed { client: cfg.http_client().unwrap(), url: cfg.feed_url() };
    let els = SearchElements::new(Element::new("overlay"), Body::new());
    let widget = SearchWidget::initialize(feed, els.clone(), IndexOptions::default());

    assert!(matches!(widget.submit("alpha").await, Err(WidgetError::Unavailable(_))));
    assert!(els.results.html().contains("Search is unavailable"));
}

#[tokio::test]
async fn page_views_fill_counters() {
    let cfg = serve(site()).await;
    let a = Element::new("views-a").with_attr(IDENTIFIER_ATTR, "/2024/01/alpha/");
    let b = Element::new("views-b").with_attr(IDENTIFIER_ATTR, "/2024/02/beta/");
    let views = PageViews::new(cfg.http_client().unwrap(), cfg.page_views_url(), vec![a.clone(), b.clone()]);

    assert_eq!(views.refresh().await, 2);
    assert_eq!(a.text(), "10");
    assert_eq!(b.text(), "20");
}

#[tokio::test]
async fn page_views_failure_leaves_counters() {
    let cfg = serve(broken_site()).await;
    let a = Element::new("views-a").with_attr(IDENTIFIER_ATTR, "/alpha/");
    a.set_text("…");
    let views = PageViews::new(cfg.http_client().unwrap(), cfg.page_views_url(), vec![a.clone()]);

    assert_eq!(views.refresh().await, 0);
    assert_eq!(a.text(), "…");
}

#[tokio::test]
async fn latest_comments_loaded_uncached() {
    let cfg = serve(site()).await;
    let container = Element::new("latest-comments");
    let card = Element::visible("card");
    let widget = LatestComments::new(cfg.http_client().unwrap(), cfg.latest_comments_url(), container.clone(), card.clone());

    assert!(widget.load().await);
    assert!(container.html().starts_with("<ul><li>first!</li></ul>"));
    assert!(container.html().contains("busted=true"));
    assert!(card.is_visible());
}

#[tokio::test]
async fn latest_comments_failure_removes_card() {
    let cfg = serve(broken_site()).await;
    let container = Element::new("latest-comments");
    let card = Element::visible("card");
    let widget = LatestComments::new(cfg.http_client().unwrap(), cfg.latest_comments_url(), container.clone(), card.clone());

    assert!(!widget.load().await);
    assert!(card.is_removed());
    assert!(!card.is_visible());
    assert_eq!(container.html(), "");
}
