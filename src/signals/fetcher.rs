//! Remote article fetching from the signals bucket.

use super::article::{Article, ArticleIndex, ArticleMeta};
use super::{SignalsError, frontmatter};
use crate::config::ConvergeConfig;
use reqwest::StatusCode;
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub struct SignalsFetcher {
    bucket_url: Url,
    http: reqwest::Client,
}

impl SignalsFetcher {
    pub fn new(config: &ConvergeConfig) -> Self {
        Self::with_bucket_url(config.signals_bucket_url.clone())
    }

    pub fn with_bucket_url(bucket_url: Url) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { bucket_url, http }
    }

    /// Fetch `index.json`: the list of article metadata.
    pub async fn fetch_index(&self) -> Result<ArticleIndex, SignalsError> {
        let url = self.object_url("index.json");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(SignalsError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| SignalsError::Parse(format!("Invalid article index format: {}", e)))
    }

    /// Fetch a single article by slug. A 404 maps to [`SignalsError::NotFound`],
    /// distinct from every other failure mode.
    pub async fn fetch_article(&self, slug: &str) -> Result<Article, SignalsError> {
        let url = self.object_url(&format!("articles/{}.md", slug));
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(SignalsError::NotFound(slug.to_string()));
        }
        if !status.is_success() {
            return Err(SignalsError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let markdown = response.text().await?;
        frontmatter::parse_article(slug, &markdown)
    }

    /// Fetch metadata for one slug via the index.
    pub async fn fetch_article_meta(&self, slug: &str) -> Result<ArticleMeta, SignalsError> {
        let index = self.fetch_index().await?;
        index
            .into_iter()
            .find(|meta| meta.slug == slug)
            .ok_or_else(|| SignalsError::NotFound(slug.to_string()))
    }

    fn object_url(&self, object: &str) -> Url {
        let mut url = self.bucket_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            object.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_url() {
        let fetcher = SignalsFetcher::with_bucket_url(
            Url::parse("https://storage.googleapis.com/converge-signals").unwrap(),
        );
        assert_eq!(
            fetcher.object_url("index.json").as_str(),
            "https://storage.googleapis.com/converge-signals/index.json"
        );
        assert_eq!(
            fetcher.object_url("articles/context-is-the-api.md").as_str(),
            "https://storage.googleapis.com/converge-signals/articles/context-is-the-api.md"
        );
    }
}
