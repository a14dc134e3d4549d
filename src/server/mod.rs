//! HTTP service for the site's demo-request form.
//!
//! A small axum app: health probe plus the lead-capture endpoint. All shared
//! pieces (config, store, limiter, notifier) are constructed up front and
//! handed to the router through [`AppState`]; nothing lives in module-level
//! statics.

mod demo;
mod email;
mod rate_limit;
mod store;

pub use demo::{DemoOutcome, DemoRequestPayload, DemoResponse, process_demo_request};
pub use email::Notifier;
pub use rate_limit::{Decision, FixedWindowLimiter};
pub use store::{DemoRequest, RequestStatus, RequestStore};

use crate::config::ConvergeConfig;
use crate::error::Result;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub struct AppState {
    pub config: ConvergeConfig,
    pub store: RequestStore,
    pub limiter: FixedWindowLimiter,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: ConvergeConfig) -> Self {
        let store = RequestStore::new(&config.data_path);
        let limiter = FixedWindowLimiter::new(
            config.rate_limit_max,
            Duration::from_secs(config.rate_limit_window_secs),
        );
        let notifier = Notifier::new(&config);
        Self {
            config,
            store,
            limiter,
            notifier,
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .route(
            "/demo-request",
            // CORS preflights (OPTIONS with Access-Control-Request-Method)
            // are intercepted and answered by the CorsLayer before reaching
            // the route; the explicit OPTIONS handler only sees bare OPTIONS
            // probes and answers 204.
            post(demo::demo_request)
                .options(demo::preflight)
                .fallback(demo::method_not_allowed),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &ConvergeConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn health() -> &'static str {
    "ok"
}

pub async fn run_server(state: Arc<AppState>, port: u16) -> Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port = port, "Demo-request service listening");
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
