//! Client-side Converge rules validation.
//!
//! Used as a fallback when the runtime's `/api/v1/validate-rules` endpoint
//! is unreachable. Deterministic, stateless string scanning: structural
//! keyword checks plus a hedge-word scan. It is intentionally much weaker
//! than the server-side validator; its confidence score says so.

use crate::api::{
    ApiClientError, IssueCategory, IssueSeverity, RuntimeClient, ValidateRulesRequest,
    ValidateRulesResponse, ValidationIssue,
};
use regex::Regex;
use std::sync::LazyLock;

/// Hedging words that make a scenario untestable.
const HEDGE_WORDS: &[&str] = &["might", "maybe", "possibly", "probably"];

/// Confidence reported for locally produced results.
const LOCAL_CONFIDENCE: f64 = 0.5;

static HEDGE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    HEDGE_WORDS
        .iter()
        .map(|word| {
            let pattern = format!(r"(?i)\b{}\b", word);
            (*word, Regex::new(&pattern).expect("hedge word pattern is valid"))
        })
        .collect()
});

/// How a validation result was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Api,
    Local,
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationMode::Api => write!(f, "api"),
            ValidationMode::Local => write!(f, "local"),
        }
    }
}

fn convention_issue(
    location: &str,
    severity: IssueSeverity,
    message: &str,
    suggestion: &str,
) -> ValidationIssue {
    ValidationIssue {
        location: location.to_string(),
        category: IssueCategory::Convention,
        severity,
        message: message.to_string(),
        suggestion: Some(suggestion.to_string()),
    }
}

/// Scan rule text for structural problems and hedging language.
pub fn validate_locally(text: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let lines: Vec<&str> = text.lines().collect();

    if !lines.iter().any(|l| l.trim().starts_with("Feature:")) {
        issues.push(convention_issue(
            "File",
            IssueSeverity::Error,
            "Missing Feature declaration",
            "Add a Feature: line at the top",
        ));
    }

    let has_given = lines.iter().any(|l| l.trim().starts_with("Given"));
    let has_when = lines.iter().any(|l| l.trim().starts_with("When"));
    let has_then = lines.iter().any(|l| l.trim().starts_with("Then"));

    if !has_given {
        issues.push(convention_issue(
            "Scenario",
            IssueSeverity::Warning,
            "Missing Given clause (preconditions)",
            "Add preconditions with Given steps",
        ));
    }
    if !has_when {
        issues.push(convention_issue(
            "Scenario",
            IssueSeverity::Warning,
            "Missing When clause (action)",
            "Add an action with When steps",
        ));
    }
    if !has_then {
        issues.push(convention_issue(
            "Scenario",
            IssueSeverity::Error,
            "Missing Then clause (expected outcome)",
            "Add expected outcomes with Then steps",
        ));
    }

    for (word, pattern) in HEDGE_PATTERNS.iter() {
        if pattern.is_match(text) {
            issues.push(convention_issue(
                "Content",
                IssueSeverity::Warning,
                &format!("Uncertain language detected: \"{}\"", word),
                "Use definite language for testable assertions",
            ));
        }
    }

    issues
}

/// Wrap locally produced issues in the response shape the API would return.
pub fn local_response(text: &str) -> ValidateRulesResponse {
    let issues = validate_locally(text);
    let is_valid = !issues.iter().any(|i| i.severity == IssueSeverity::Error);
    ValidateRulesResponse {
        is_valid,
        scenario_count: 0,
        issues,
        confidence: LOCAL_CONFIDENCE,
    }
}

/// Validate via the runtime API, falling back to the local validator when
/// the API cannot be reached or rejects the request. A schema error (the
/// API answered 2xx with a malformed body) is terminal: the caller should
/// see it rather than a silently degraded result.
pub async fn validate_with_fallback(
    client: &RuntimeClient,
    content: &str,
    use_llm: bool,
) -> Result<(ValidateRulesResponse, ValidationMode), ApiClientError> {
    let request = ValidateRulesRequest {
        content: content.to_string(),
        file_name: Some("rules.feature".to_string()),
        use_llm: Some(use_llm),
    };

    match client.validate_rules(&request).await {
        Ok(response) => Ok((response, ValidationMode::Api)),
        Err(e @ ApiClientError::Schema { .. }) => {
            tracing::error!(error = %e, "Response validation failed");
            Err(e)
        }
        Err(e) => {
            tracing::warn!(error = %e, "API validation failed, falling back to local checks");
            Ok((local_response(content), ValidationMode::Local))
        }
    }
}
