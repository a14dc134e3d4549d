//! HTTP client for the Converge runtime API.
//!
//! Every call returns an explicit [`ApiResult`] so callers must inspect the
//! outcome; nothing here panics or hides failures. The three error variants
//! are deliberately distinct: transport problems, structured API errors, and
//! well-transported responses whose body does not match the declared shape.

use crate::api::types::{
    ApiError, HealthResponse, JobRequest, JobResponse, ReadyResponse, ValidateRulesRequest,
    ValidateRulesResponse,
};
use crate::config::ConvergeConfig;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ApiClientError {
    /// The request never completed (DNS, connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-2xx status and (possibly) a structured body.
    #[error("API error {status}: {}", .error.message)]
    Api { status: u16, error: ApiError },

    /// A 2xx response whose body does not match the declared schema.
    #[error("Response validation failed: {message}")]
    Schema { message: String },
}

impl ApiClientError {
    pub fn is_schema(&self) -> bool {
        matches!(self, ApiClientError::Schema { .. })
    }
}

pub type ApiResult<T> = Result<T, ApiClientError>;

pub struct RuntimeClient {
    base_url: Url,
    http: reqwest::Client,
}

impl RuntimeClient {
    pub fn new(config: &ConvergeConfig) -> Self {
        Self::with_base_url(config.api_url.clone())
    }

    pub fn with_base_url(base_url: Url) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { base_url, http }
    }

    /// Health check. The runtime answers with a bare text body.
    pub async fn health(&self) -> ApiResult<HealthResponse> {
        let url = self.endpoint("/health");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(error_from_body(status, &body));
        }
        Ok(HealthResponse { status: body })
    }

    /// Readiness check with per-service states.
    pub async fn ready(&self) -> ApiResult<ReadyResponse> {
        self.request(Method::GET, "/ready", None::<&()>).await
    }

    /// Submit a job to the convergence engine.
    pub async fn create_job(&self, job: &JobRequest) -> ApiResult<JobResponse> {
        self.request(Method::POST, "/api/v1/jobs", Some(job)).await
    }

    /// Validate Converge rules server-side.
    pub async fn validate_rules(
        &self,
        request: &ValidateRulesRequest,
    ) -> ApiResult<ValidateRulesResponse> {
        self.request(Method::POST, "/api/v1/validate-rules", Some(request))
            .await
    }

    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(path);
        let mut builder = self.http.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(error_from_body(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| ApiClientError::Schema {
            message: e.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        // Url::join would drop any base path segment; append instead.
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        url
    }
}

fn error_from_body(status: StatusCode, body: &str) -> ApiClientError {
    let error = serde_json::from_str::<ApiError>(body).unwrap_or_else(|_| ApiError {
        error: "request_failed".to_string(),
        message: format!("Request failed with status {}", status.as_u16()),
    });
    ApiClientError::Api {
        status: status.as_u16(),
        error,
    }
}
