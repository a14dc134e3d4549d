//! Signals (blog) content: remote fetching with bundled static fallback.
//!
//! Articles live in a public bucket (`index.json` plus one markdown file per
//! slug). The same articles ship inside the binary, and [`SignalsStore`]
//! silently substitutes the bundled copy whenever the remote fetch fails.

mod article;
mod fetcher;
mod frontmatter;
mod library;

pub use article::{Article, ArticleIndex, ArticleMeta};
pub use fetcher::SignalsFetcher;
pub use frontmatter::{estimate_reading_time, parse_article};
pub use library::{SignalsStore, Source, StaticLibrary};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalsError {
    /// The slug has no article behind it (remote 404 or unknown in index).
    #[error("Article not found: {0}")]
    NotFound(String),

    /// The bucket answered with an unexpected non-2xx status.
    #[error("Failed to fetch {url}: status {status}")]
    Fetch { url: String, status: u16 },

    /// The request never completed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The payload did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}
