//! Client for the external Converge runtime API.
//!
//! Covers the four endpoints the site talks to: `GET /health`, `GET /ready`,
//! `POST /api/v1/jobs` and `POST /api/v1/validate-rules`. Responses are
//! deserialized into the declared shapes; anything else is an error the
//! caller can distinguish from transport and API failures.

mod client;
mod types;

pub use client::{ApiClientError, ApiResult, RuntimeClient};
pub use types::*;
