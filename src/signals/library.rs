//! Bundled static articles and the remote-first read-through store.

use super::article::{Article, ArticleIndex, ArticleMeta};
use super::fetcher::SignalsFetcher;
use super::{SignalsError, frontmatter};
use crate::config::ConvergeConfig;

/// Articles compiled into the binary. Kept in sync with the bucket copy by
/// the publishing pipeline; used whenever the bucket is unreachable.
const BUNDLED_ARTICLES: &[(&str, &str)] = &[
    (
        "agent-system-operating-system",
        include_str!("../../assets/signals/agent-system-operating-system.md"),
    ),
    (
        "context-is-the-api",
        include_str!("../../assets/signals/context-is-the-api.md"),
    ),
    (
        "evals-hidden-moat",
        include_str!("../../assets/signals/evals-hidden-moat.md"),
    ),
];

/// In-binary copy of the signals library.
pub struct StaticLibrary {
    articles: Vec<Article>,
}

impl StaticLibrary {
    pub fn bundled() -> Self {
        let mut articles = Vec::with_capacity(BUNDLED_ARTICLES.len());
        for (slug, raw) in BUNDLED_ARTICLES {
            match frontmatter::parse_article(slug, raw) {
                Ok(article) => articles.push(article),
                Err(e) => {
                    tracing::warn!(slug = %slug, error = %e, "Failed to parse bundled article")
                }
            }
        }
        Self { articles }
    }

    pub fn index(&self) -> ArticleIndex {
        self.articles.iter().map(|a| a.meta.clone()).collect()
    }

    pub fn article(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug() == slug)
    }
}

/// Where a piece of content actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Remote,
    Static,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Remote => write!(f, "remote"),
            Source::Static => write!(f, "static"),
        }
    }
}

/// Remote-first article access with silent fallback to the bundled copy.
pub struct SignalsStore {
    fetcher: SignalsFetcher,
    library: StaticLibrary,
}

impl SignalsStore {
    pub fn new(config: &ConvergeConfig) -> Self {
        Self {
            fetcher: SignalsFetcher::new(config),
            library: StaticLibrary::bundled(),
        }
    }

    pub fn with_parts(fetcher: SignalsFetcher, library: StaticLibrary) -> Self {
        Self { fetcher, library }
    }

    /// The article index. Any remote failure substitutes the bundled index.
    pub async fn index(&self) -> (ArticleIndex, Source) {
        match self.fetcher.fetch_index().await {
            Ok(index) => (index, Source::Remote),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch article index, using static data");
                (self.library.index(), Source::Static)
            }
        }
    }

    /// A single article. Remote failures fall back to the bundled copy when
    /// the slug exists there; otherwise the original error surfaces, so a
    /// remote 404 for an unknown slug stays a `NotFound`.
    pub async fn article(&self, slug: &str) -> Result<(Article, Source), SignalsError> {
        match self.fetcher.fetch_article(slug).await {
            Ok(article) => Ok((article, Source::Remote)),
            Err(e) => match self.library.article(slug) {
                Some(article) => {
                    tracing::warn!(slug = %slug, error = %e, "Failed to fetch article, using static data");
                    Ok((article.clone(), Source::Static))
                }
                None => Err(e),
            },
        }
    }

    /// Metadata for one slug, remote-first against the index.
    pub async fn article_meta(&self, slug: &str) -> Result<(ArticleMeta, Source), SignalsError> {
        match self.fetcher.fetch_article_meta(slug).await {
            Ok(meta) => Ok((meta, Source::Remote)),
            Err(e) => match self.library.article(slug) {
                Some(article) => Ok((article.meta.clone(), Source::Static)),
                None => Err(e),
            },
        }
    }
}
