//! # qbot-transport
//!
//! The HTTP boundary of the qbot client: the [`Transport`] trait ("POST a method
//! with params, get status + body"), its reqwest implementation, and the
//! environment-backed [`ApiConfig`]. Production code talks to the platform via
//! [`HttpTransport`]; tests substitute another Transport impl.

mod config;
mod http;

pub use config::ApiConfig;
pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use qbot_core::Result;

/// One raw API response: status code plus the unparsed body. Non-200 statuses
/// are returned here, not as errors; interpreting them is the validator's job.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

/// Performs one synchronous request against the platform API.
/// `Err` means the call did not complete at all (network failure, no response).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, method: &str, params: &serde_json::Value) -> Result<RawResponse>;
}
