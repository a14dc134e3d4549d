//! YAML frontmatter parsing for signals articles.

use super::SignalsError;
use super::article::{Article, ArticleMeta};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const FRONTMATTER_DELIMITER: &str = "---";

/// Words-per-minute basis for the reading-time fallback.
const WORDS_PER_MINUTE: usize = 200;

/// Frontmatter block of an article file. The slug is not part of the
/// frontmatter; it comes from the file name / request path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Frontmatter {
    title: String,

    #[serde(default)]
    subtitle: Option<String>,

    author: String,
    published_at: DateTime<Utc>,

    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    tags: Vec<String>,

    #[serde(default)]
    reading_time: Option<u32>,

    #[serde(default)]
    featured: bool,
}

/// Parse a markdown document with a `---`-delimited YAML frontmatter block
/// into a full [`Article`] for the given slug.
pub fn parse_article(slug: &str, content: &str) -> Result<Article, SignalsError> {
    let content = content.trim();

    if !content.starts_with(FRONTMATTER_DELIMITER) {
        return Err(SignalsError::Parse(
            "Missing YAML frontmatter delimiter".to_string(),
        ));
    }

    let after_first = &content[FRONTMATTER_DELIMITER.len()..];
    let end_index = after_first.find(FRONTMATTER_DELIMITER).ok_or_else(|| {
        SignalsError::Parse("Missing closing frontmatter delimiter".to_string())
    })?;

    let yaml_content = after_first[..end_index].trim();
    let body_start = FRONTMATTER_DELIMITER.len() + end_index + FRONTMATTER_DELIMITER.len();
    let body = content[body_start..].trim().to_string();

    let frontmatter: Frontmatter = serde_yaml::from_str(yaml_content)
        .map_err(|e| SignalsError::Parse(format!("Invalid frontmatter in '{}': {}", slug, e)))?;

    let reading_time = frontmatter
        .reading_time
        .unwrap_or_else(|| estimate_reading_time(&body));

    Ok(Article {
        meta: ArticleMeta {
            slug: slug.to_string(),
            title: frontmatter.title,
            subtitle: frontmatter.subtitle,
            author: frontmatter.author,
            published_at: frontmatter.published_at,
            updated_at: frontmatter.updated_at,
            tags: frontmatter.tags,
            reading_time,
            featured: frontmatter.featured,
        },
        content: body,
    })
}

/// Reading time in minutes at 200 wpm, never less than one minute.
pub fn estimate_reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    std::cmp::max(1, words.div_ceil(WORDS_PER_MINUTE)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_article() {
        let content = r#"---
title: Context Is the API
subtitle: Why agents should never talk to each other
author: Kenneth
publishedAt: 2025-03-02T09:00:00Z
tags: [architecture, agents]
readingTime: 9
featured: true
---

Agents do not message each other. They converge on shared context.
"#;

        let article = parse_article("context-is-the-api", content).unwrap();
        assert_eq!(article.slug(), "context-is-the-api");
        assert_eq!(article.meta.title, "Context Is the API");
        assert_eq!(article.meta.reading_time, 9);
        assert!(article.meta.featured);
        assert_eq!(article.meta.tags, vec!["architecture", "agents"]);
        assert!(article.content.starts_with("Agents do not message"));
    }

    #[test]
    fn test_missing_delimiter_is_an_error() {
        assert!(parse_article("x", "no frontmatter here").is_err());
        assert!(parse_article("x", "---\ntitle: Unclosed").is_err());
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let content = "---\ntitle: No author\npublishedAt: 2025-01-01T00:00:00Z\n---\nbody";
        assert!(parse_article("x", content).is_err());
    }

    #[test]
    fn test_reading_time_fallback() {
        let content = format!(
            "---\ntitle: T\nauthor: A\npublishedAt: 2025-01-01T00:00:00Z\n---\n{}",
            "word ".repeat(450)
        );
        let article = parse_article("x", &content).unwrap();
        // 450 words at 200 wpm, rounded up.
        assert_eq!(article.meta.reading_time, 3);
    }

    #[test]
    fn test_reading_time_minimum_one_minute() {
        assert_eq!(estimate_reading_time("just a few words"), 1);
    }
}
