//! # Converge site backend
//!
//! The functional half of the converge.zone marketing site: everything that
//! is not page markup. One binary (`converge`) serves the demo-request form
//! endpoint and doubles as a toolkit for the content and validation paths
//! the site relies on.
//!
//! ## What lives here
//!
//! - **Demo requests**: an axum endpoint that validates a name/email
//!   submission, rate limits by IP, stores a document, and fires a
//!   best-effort notification email
//! - **Runtime API client**: typed wrapper around the Converge runtime's
//!   job and rules-validation endpoints
//! - **Signals content**: bucket-hosted blog articles with a bundled static
//!   fallback
//! - **Rules validation**: client-side structural checks used when the
//!   runtime is unreachable
//! - **Pager**: the terminal transcript viewer behind `converge pitch`
//!
//! ## Quick start
//!
//! ```bash
//! # Run the form-handler service
//! converge serve --port 8787
//!
//! # Validate a rules file (API first, local fallback)
//! converge validate travel.feature
//!
//! # Browse signals articles
//! converge signals list
//! converge signals show context-is-the-api
//! ```

/// Client for the external Converge runtime API.
pub mod api;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration from environment variables with hardcoded defaults.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `ConvergeError` enum and `Result<T>` type alias.
pub mod error;

pub mod logging;

/// Terminal pager for fixed text blobs.
pub mod pager;

/// Client-side rules validation and the API-first fallback flow.
pub mod rules;

/// The demo-request HTTP service: router, store, limiter, notifier.
pub mod server;

/// Signals (blog) articles: remote fetch with bundled fallback.
pub mod signals;
