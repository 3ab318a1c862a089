use super::{ClientError, GcmClient};
use crate::config::GcmConfig;
use crate::domain::packet::Packet;
use crate::domain::response::{GcmResponse, ResponseBody};
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use std::time::Duration;

/// GCM client speaking the legacy HTTP JSON API.
#[derive(Clone)]
pub struct HttpGcmClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl std::fmt::Debug for HttpGcmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGcmClient").field("endpoint", &self.endpoint).finish_non_exhaustive()
    }
}

impl HttpGcmClient {
    /// Creates a client for the configured endpoint.
    ///
    /// # Errors
    /// Returns `ClientError::Configuration` if the API key is blank, or
    /// `ClientError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &GcmConfig) -> Result<Self, ClientError> {
        if config.api_key.trim().is_empty() {
            return Err(ClientError::Configuration("API key must not be empty".to_string()));
        }

        let http = reqwest::Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self { http, endpoint: config.endpoint.clone(), api_key: config.api_key.clone() })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GcmClient for HttpGcmClient {
    #[tracing::instrument(level = "debug", skip_all, fields(tokens = packet.registration_ids.len()))]
    async fn send(&self, packet: &Packet) -> Result<GcmResponse, ClientError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("key={}", self.api_key))
            .json(packet)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let bytes = response.bytes().await?;
                let body: ResponseBody = serde_json::from_slice(&bytes)?;
                tracing::debug!(
                    multicast_id = body.multicast_id,
                    success = body.success,
                    failure = body.failure,
                    "GCM accepted packet"
                );
                Ok(GcmResponse::from_body(&packet.registration_ids, body))
            }
            StatusCode::BAD_REQUEST => Err(ClientError::InvalidRequest(response.text().await?)),
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
            s if s.is_server_error() => {
                let retry_after =
                    response.headers().get(RETRY_AFTER).and_then(|v| v.to_str().ok()).map(str::to_string);
                Err(ClientError::ServiceUnavailable { status: s.as_u16(), retry_after })
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: s.as_u16(), body })
            }
        }
    }
}
