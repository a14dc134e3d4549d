//! The demo-request endpoint: validate, rate limit, store, notify.

use super::AppState;
use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, LazyLock};

use super::rate_limit::Decision;

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Marker recorded on every stored submission.
const REQUEST_SOURCE: &str = "website";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemoRequestPayload {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoResponse {
    pub success: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Full outcome of a submission, including the Retry-After hint on 429.
#[derive(Debug)]
pub struct DemoOutcome {
    pub status: StatusCode,
    pub retry_after_secs: Option<u64>,
    pub body: DemoResponse,
}

impl DemoOutcome {
    fn rejected(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            retry_after_secs: None,
            body: DemoResponse {
                success: false,
                message: message.to_string(),
                id: None,
            },
        }
    }
}

impl IntoResponse for DemoOutcome {
    fn into_response(self) -> Response {
        match self.retry_after_secs {
            Some(secs) => (
                self.status,
                [(header::RETRY_AFTER, secs.to_string())],
                Json(self.body),
            )
                .into_response(),
            None => (self.status, Json(self.body)).into_response(),
        }
    }
}

/// Validate and normalize a payload: trimmed name, trimmed lowercased email.
fn validate_payload(payload: &DemoRequestPayload) -> Result<(String, String), &'static str> {
    let name = payload.name.trim();
    let email = payload.email.trim();

    if name.is_empty() || email.is_empty() {
        return Err("Name and email are required");
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err("Name is too long");
    }
    if email.chars().count() > MAX_EMAIL_LENGTH || !EMAIL_PATTERN.is_match(email) {
        return Err("Invalid email format");
    }

    Ok((name.to_string(), email.to_lowercase()))
}

/// Core submission flow, separated from the axum extractors for testing.
pub async fn process_demo_request(
    state: &AppState,
    ip: IpAddr,
    payload: DemoRequestPayload,
) -> DemoOutcome {
    let (name, email) = match validate_payload(&payload) {
        Ok(normalized) => normalized,
        Err(message) => return DemoOutcome::rejected(StatusCode::BAD_REQUEST, message),
    };

    if let Decision::Limited { retry_after_secs } = state.limiter.check(ip).await {
        tracing::warn!(ip = %ip, "Demo request rate limited");
        let mut outcome = DemoOutcome::rejected(
            StatusCode::TOO_MANY_REQUESTS,
            "Too many requests, please try again later",
        );
        outcome.retry_after_secs = Some(retry_after_secs);
        return outcome;
    }

    let request = match state.store.create(&name, &email, REQUEST_SOURCE) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!(error = %e, "Failed to store demo request");
            return DemoOutcome::rejected(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            );
        }
    };

    // Best effort: an email failure must never affect the HTTP response.
    if let Err(e) = state.notifier.notify_demo_request(&request).await {
        tracing::warn!(id = %request.id, error = %e, "Failed to send notification email");
    }

    DemoOutcome {
        status: StatusCode::OK,
        retry_after_secs: None,
        body: DemoResponse {
            success: true,
            message: "Demo request received".to_string(),
            id: Some(request.id),
        },
    }
}

pub async fn demo_request(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    Json(payload): Json<DemoRequestPayload>,
) -> DemoOutcome {
    process_demo_request(&state, addr.ip(), payload).await
}

pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub async fn method_not_allowed() -> DemoOutcome {
    DemoOutcome::rejected(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}
