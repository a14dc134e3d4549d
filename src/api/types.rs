//! Wire types for the Converge runtime API.
//!
//! These structs are the declared response shapes; deserializing into them
//! is what separates a well-formed response from a malformed one.

use crate::error::{ConvergeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    pub cycles: u64,
    pub converged: bool,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub fact_counts: HashMap<String, u64>,
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    pub metadata: JobMetadata,
    pub cycles: u64,
    pub converged: bool,
    pub context_summary: ContextSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRulesRequest {
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_llm: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    BusinessSense,
    Compilability,
    Convention,
    Syntax,
    InternalError,
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCategory::BusinessSense => write!(f, "business_sense"),
            IssueCategory::Compilability => write!(f, "compilability"),
            IssueCategory::Convention => write!(f, "convention"),
            IssueCategory::Syntax => write!(f, "syntax"),
            IssueCategory::InternalError => write!(f, "internal_error"),
        }
    }
}

impl FromStr for IssueCategory {
    type Err = ConvergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "business_sense" => Ok(IssueCategory::BusinessSense),
            "compilability" => Ok(IssueCategory::Compilability),
            "convention" => Ok(IssueCategory::Convention),
            "syntax" => Ok(IssueCategory::Syntax),
            "internal_error" => Ok(IssueCategory::InternalError),
            _ => Err(ConvergeError::Parse(format!("Invalid issue category: {}", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Info,
    Warning,
    Error,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueSeverity::Info => write!(f, "info"),
            IssueSeverity::Warning => write!(f, "warning"),
            IssueSeverity::Error => write!(f, "error"),
        }
    }
}

impl FromStr for IssueSeverity {
    type Err = ConvergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "info" => Ok(IssueSeverity::Info),
            "warning" => Ok(IssueSeverity::Warning),
            "error" => Ok(IssueSeverity::Error),
            _ => Err(ConvergeError::Parse(format!("Invalid issue severity: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub location: String,
    pub category: IssueCategory,
    pub severity: IssueSeverity,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateRulesResponse {
    pub is_valid: bool,
    pub scenario_count: u64,
    pub issues: Vec<ValidationIssue>,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
    pub services: HashMap<String, String>,
}

/// Structured error body returned by the runtime API on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub message: String,
}
