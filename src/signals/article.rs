use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a signals article, as stored in the bucket's `index.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleMeta {
    pub slug: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    pub author: String,
    pub published_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Estimated reading time in minutes.
    pub reading_time: u32,

    #[serde(default)]
    pub featured: bool,
}

/// A full article: metadata plus markdown body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(flatten)]
    pub meta: ArticleMeta,

    /// Markdown content without the frontmatter block.
    pub content: String,
}

impl Article {
    pub fn slug(&self) -> &str {
        &self.meta.slug
    }
}

pub type ArticleIndex = Vec<ArticleMeta>;
