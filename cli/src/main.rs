use anyhow::Result;
use clap::{Parser, Subcommand};
use sitekit::dom::{Body, Element};
use sitekit::latest_comments::LatestComments;
use sitekit::page_views::{PageViews, IDENTIFIER_ATTR};
use sitekit::share::{PopupGeometry, SHARE_WINDOW_NAME};
use sitekit::{FeedSource, FileFeed, HttpFeed, SearchElements, SearchWidget, SiteConfig};
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "sitekit")]
#[command(about = "Drive the site's client-side widgets from the command line", long_about = None)]
struct Cli {
    /// JSON config file (see SiteConfig)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Site root, e.g. https://blog.example.com
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the search feed and run queries against it
    Search {
        /// Feed URL or local path; defaults to the site's feed
        #[arg(long)]
        feed: Option<String>,
        /// Weight of title matches relative to other fields
        #[arg(long)]
        title_boost: Option<f32>,
        /// Print results as JSON instead of rendered HTML
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Queries to run; read one per line from stdin when empty
        queries: Vec<String>,
    },
    /// Fetch page view counts for the given post identifiers
    PageViews {
        #[arg(long = "url", required = true)]
        urls: Vec<String>,
    },
    /// Fetch the latest comments fragment
    LatestComments,
    /// Print the popup window features for a share link
    Share {
        #[arg(long, default_value_t = 1920)]
        screen_width: i32,
        #[arg(long, default_value_t = 1080)]
        screen_height: i32,
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let mut cfg = SiteConfig::load(cli.config.as_deref())?;
    if let Some(base_url) = cli.base_url {
        cfg.base_url = base_url;
    }

    match cli.command {
        Commands::Search { feed, title_boost, json, queries } => {
            if let Some(boost) = title_boost {
                cfg.title_boost = boost;
            }
            let feed = feed.unwrap_or_else(|| cfg.feed_url());
            if feed.starts_with("http://") || feed.starts_with("https://") {
                search(HttpFeed { client: cfg.http_client()?, url: feed }, &cfg, json, queries).await
            } else {
                search(FileFeed { path: PathBuf::from(feed) }, &cfg, json, queries).await
            }
        }
        Commands::PageViews { urls } => {
            let counters: Vec<Element> = urls.iter().map(|u| Element::new(u).with_attr(IDENTIFIER_ATTR, u.as_str())).collect();
            let views = PageViews::new(cfg.http_client()?, cfg.page_views_url(), counters.clone());
            let updated = views.refresh().await;
            tracing::info!(updated, requested = counters.len(), "page views");
            for counter in counters {
                println!("{}\t{}", counter.name(), counter.text());
            }
            Ok(())
        }
        Commands::LatestComments => {
            let container = Element::new("latest-comments");
            let card = Element::visible("card");
            let widget = LatestComments::new(cfg.http_client()?, cfg.latest_comments_url(), container.clone(), card);
            if widget.load().await {
                println!("{}", container.html());
            } else {
                eprintln!("latest comments unavailable; card removed");
            }
            Ok(())
        }
        Commands::Share { screen_width, screen_height, url } => {
            let geometry = PopupGeometry::centered(screen_width, screen_height);
            println!("{url}\t{SHARE_WINDOW_NAME}\t{}", geometry.window_features());
            Ok(())
        }
    }
}

async fn search<S: FeedSource>(source: S, cfg: &SiteConfig, json: bool, queries: Vec<String>) -> Result<()> {
    let elements = SearchElements::new(Element::new("overlay"), Body::new());
    let widget = SearchWidget::initialize(source, elements.clone(), cfg.index_options());

    let queries = if queries.is_empty() {
        std::io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        queries
    };

    for query in queries {
        let docs = widget.submit(&query).await?;
        if json {
            let results: Vec<_> = docs.iter().map(|d| serde_json::json!({ "title": d.title, "url": d.url })).collect();
            println!("{}", serde_json::json!({ "query": query, "total_hits": docs.len(), "results": results }));
        } else {
            println!("{}", elements.results.html());
        }
        widget.dismiss();
    }
    Ok(())
}
