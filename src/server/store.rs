//! Flat-file document store for demo requests.
//!
//! One JSON document per request in the data directory. Records are
//! immutable once written; there is no update or delete path.

use crate::error::{ConvergeError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fmt, str::FromStr};

const ID_LENGTH: usize = 20;

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
        }
    }
}

impl FromStr for RequestStatus {
    type Err = ConvergeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            _ => Err(ConvergeError::Parse(format!("Invalid request status: {}", s))),
        }
    }
}

/// A stored lead-capture submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub status: RequestStatus,

    pub source: String,
}

pub struct RequestStore {
    data_path: PathBuf,
}

impl RequestStore {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    fn generate_id() -> String {
        nanoid::format(nanoid::rngs::default, &ID_ALPHABET, ID_LENGTH)
    }

    /// Persist a new request. Name and email are expected to be already
    /// validated and normalized by the handler.
    pub fn create(&self, name: &str, email: &str, source: &str) -> Result<DemoRequest> {
        let request = DemoRequest {
            id: Self::generate_id(),
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
            status: RequestStatus::Pending,
            source: source.to_string(),
        };

        std::fs::create_dir_all(&self.data_path)?;

        let file_path = self.data_path.join(format!("{}.json", request.id));
        let content = serde_json::to_string_pretty(&request)?;
        atomic_write(&file_path, &content)?;

        tracing::info!(id = %request.id, email = %request.email, "Demo request stored");
        Ok(request)
    }

    /// All stored requests, oldest first. Unreadable documents are skipped
    /// with a warning rather than failing the whole listing.
    pub fn list(&self) -> Result<Vec<DemoRequest>> {
        if !self.data_path.exists() {
            return Ok(Vec::new());
        }

        let mut requests: Vec<DemoRequest> = Vec::new();
        for entry in std::fs::read_dir(&self.data_path)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
                match std::fs::read_to_string(&path) {
                    Ok(content) => match serde_json::from_str(&content) {
                        Ok(request) => requests.push(request),
                        Err(e) => tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse request document"
                        ),
                    },
                    Err(e) => tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read request document"
                    ),
                }
            }
        }

        requests.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(requests)
    }
}

/// Atomic write via temp file + rename, so a crash never leaves a
/// half-written document behind.
fn atomic_write(target_path: &Path, content: &str) -> Result<()> {
    let target_dir = target_path
        .parent()
        .ok_or_else(|| ConvergeError::Storage("Target path has no parent directory".to_string()))?;

    let mut temp_file = tempfile::NamedTempFile::new_in(target_dir)
        .map_err(|e| ConvergeError::Storage(format!("Failed to create temp file: {}", e)))?;

    use std::io::Write;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| ConvergeError::Storage(format!("Failed to write to temp file: {}", e)))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| ConvergeError::Storage(format!("Failed to sync temp file: {}", e)))?;

    temp_file
        .persist(target_path)
        .map_err(|e| ConvergeError::Storage(format!("Failed to persist temp file: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_and_list() {
        let temp_dir = TempDir::new().unwrap();
        let store = RequestStore::new(temp_dir.path());

        let first = store.create("Ada Lovelace", "ada@example.com", "website").unwrap();
        let second = store.create("Grace Hopper", "grace@example.com", "website").unwrap();

        assert_eq!(first.id.len(), 20);
        assert_ne!(first.id, second.id);
        assert_eq!(first.status, RequestStatus::Pending);

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|r| r.email == "ada@example.com"));
    }

    #[test]
    fn test_list_skips_unparseable_documents() {
        let temp_dir = TempDir::new().unwrap();
        let store = RequestStore::new(temp_dir.path());

        store.create("Ada", "ada@example.com", "website").unwrap();
        std::fs::write(temp_dir.path().join("broken.json"), "{not json").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[test]
    fn test_list_on_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = RequestStore::new(temp_dir.path().join("nope"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_request_serializes_with_lowercase_status() {
        let temp_dir = TempDir::new().unwrap();
        let store = RequestStore::new(temp_dir.path());
        let request = store.create("Ada", "ada@example.com", "website").unwrap();

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""status":"pending""#));
        assert!(json.contains(r#""source":"website""#));
    }
}
