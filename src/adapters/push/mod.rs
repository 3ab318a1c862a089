pub mod gcm;

use crate::domain::packet::Packet;
use crate::domain::response::GcmResponse;
use async_trait::async_trait;
use thiserror::Error;

pub use gcm::HttpGcmClient;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("GCM rejected the API key")]
    Unauthorized,
    #[error("GCM rejected the request: {0}")]
    InvalidRequest(String),
    #[error("GCM service unavailable (status {status})")]
    ServiceUnavailable { status: u16, retry_after: Option<String> },
    #[error("Unexpected GCM response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("Malformed GCM response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Invalid GCM client configuration: {0}")]
    Configuration(String),
    #[error("External service error: {0}")]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait GcmClient: Send + Sync + std::fmt::Debug {
    /// Sends one packet to GCM.
    ///
    /// # Errors
    /// Returns a `ClientError` when the request could not be delivered or GCM
    /// rejected it as a whole. Per-token delivery failures are reported inside
    /// the returned `GcmResponse` instead.
    async fn send(&self, packet: &Packet) -> Result<GcmResponse, ClientError>;
}
