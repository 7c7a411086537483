use crate::corpus::Document;
use maud::{html, Markup};

pub const NO_RESULTS: &str = "No results found";
pub const UNAVAILABLE: &str = "Search is unavailable";

/// One `<li><a href=URL>TITLE</a></li>` per result, or a single "No results found" item.
pub fn render_results(results: &[&Document]) -> Markup {
    html! {
        @if results.is_empty() {
            li { (NO_RESULTS) }
        } @else {
            @for doc in results {
                li { a href=(doc.url) { (doc.title) } }
            }
        }
    }
}

/// Shown in place of results when the feed could not be loaded.
pub fn render_unavailable() -> Markup {
    html! { li.search-error { (UNAVAILABLE) } }
}
