use crate::error::{ConvergeError, Result};
use std::path::PathBuf;
use url::Url;

/// Runtime configuration for the site backend.
///
/// Built explicitly from environment variables with hardcoded fallback
/// defaults and passed by reference; there is no process-wide cached copy.
#[derive(Debug, Clone)]
pub struct ConvergeConfig {
    /// Base URL of the Converge runtime API.
    pub api_url: Url,

    /// Base URL of the signals content bucket.
    pub signals_bucket_url: Url,

    /// Address that receives demo-request notifications.
    pub notify_email: String,

    /// Sender address for notification emails.
    pub from_email: String,

    /// Resend API key; notifications are skipped when absent.
    pub resend_api_key: Option<String>,

    /// Directory holding stored demo-request documents.
    pub data_path: PathBuf,

    /// Accepted demo requests per IP per window.
    pub rate_limit_max: u32,

    /// Rate-limit window in seconds.
    pub rate_limit_window_secs: u64,

    /// Origins allowed to call the demo-request endpoint.
    pub allowed_origins: Vec<String>,
}

fn default_api_url() -> &'static str {
    "http://localhost:8080"
}

fn default_signals_bucket_url() -> &'static str {
    "https://storage.googleapis.com/converge-signals"
}

fn default_notify_email() -> &'static str {
    "kenneth@aprio.one"
}

fn default_from_email() -> &'static str {
    "Converge <notifications@converge.zone>"
}

fn default_data_path() -> &'static str {
    "./data/demo-requests"
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "https://converge.zone".to_string(),
        "https://www.converge.zone".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

impl Default for ConvergeConfig {
    fn default() -> Self {
        Self {
            // Defaults are compile-time constants and always parse.
            api_url: Url::parse(default_api_url()).expect("default API URL is valid"),
            signals_bucket_url: Url::parse(default_signals_bucket_url())
                .expect("default bucket URL is valid"),
            notify_email: default_notify_email().to_string(),
            from_email: default_from_email().to_string(),
            resend_api_key: None,
            data_path: PathBuf::from(default_data_path()),
            rate_limit_max: 5,
            rate_limit_window_secs: 3600,
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl ConvergeConfig {
    /// Load configuration from the environment, falling back to defaults
    /// for anything unset. Malformed URLs are a configuration error.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = env_var("CONVERGE_API_URL") {
            config.api_url = parse_url("CONVERGE_API_URL", &value)?;
        }
        if let Some(value) = env_var("CONVERGE_SIGNALS_BUCKET_URL") {
            config.signals_bucket_url = parse_url("CONVERGE_SIGNALS_BUCKET_URL", &value)?;
        }
        if let Some(value) = env_var("CONVERGE_NOTIFY_EMAIL") {
            config.notify_email = value;
        }
        if let Some(value) = env_var("CONVERGE_FROM_EMAIL") {
            config.from_email = value;
        }
        if let Some(value) = env_var("RESEND_API_KEY") {
            config.resend_api_key = Some(value);
        }
        if let Some(value) = env_var("CONVERGE_DATA_PATH") {
            config.data_path = PathBuf::from(value);
        }

        Ok(config)
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_url(name: &str, value: &str) -> Result<Url> {
    Url::parse(value)
        .map_err(|e| ConvergeError::Config(format!("{}: invalid URL '{}': {}", name, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConvergeConfig::default();
        assert_eq!(config.api_url.as_str(), "http://localhost:8080/");
        assert_eq!(config.rate_limit_max, 5);
        assert_eq!(config.rate_limit_window_secs, 3600);
        assert!(config.resend_api_key.is_none());
        assert!(
            config
                .allowed_origins
                .iter()
                .any(|o| o == "https://converge.zone")
        );
    }

    #[test]
    fn test_parse_url_rejects_garbage() {
        assert!(parse_url("CONVERGE_API_URL", "not a url").is_err());
        assert!(parse_url("CONVERGE_API_URL", "https://api.converge.zone").is_ok());
    }
}
