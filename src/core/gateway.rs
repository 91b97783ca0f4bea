//! HTTP gateway to the assistant backend.
//!
//! All transport and backend failures are normalized here into a single
//! user-facing detail string, so the rest of the program never inspects
//! response bodies or status codes.

use std::error::Error;
use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::api::{AssistantReply, ChatRequest, HealthStatus};
use crate::utils::url::{construct_api_url, normalize_base_url};

/// Shown when a failure carries no usable detail of its own.
pub const GENERIC_ERROR_DETAIL: &str = "Unexpected error";

/// A failed backend interaction.
#[derive(Debug)]
pub enum GatewayError {
    /// The request never produced a usable response: connection refused,
    /// timeout, or a success body that failed to decode. The underlying
    /// error is kept for logs but users see the generic detail.
    Transport(reqwest::Error),
    /// The backend answered with a non-success status. `detail` is already
    /// normalized from the response body.
    Backend { status: StatusCode, detail: String },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Transport(_) => f.write_str(GENERIC_ERROR_DETAIL),
            GatewayError::Backend { detail, .. } => f.write_str(detail),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GatewayError::Transport(err) => Some(err),
            GatewayError::Backend { .. } => None,
        }
    }
}

/// Pull a human-readable detail out of an error response body.
///
/// Tries the body's `error` field, then `detail`, then gives up and returns
/// the generic message. A tier only wins with a non-empty string; numbers,
/// objects, and empty strings fall through to the next.
pub fn extract_error_detail(body: &str) -> String {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return GENERIC_ERROR_DETAIL.to_string(),
    };
    for key in ["error", "detail"] {
        if let Some(text) = value.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    GENERIC_ERROR_DETAIL.to_string()
}

/// Client for the chat backend. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct AssistantGateway {
    client: reqwest::Client,
    base_url: String,
}

impl AssistantGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        AssistantGateway {
            client: reqwest::Client::new(),
            base_url: normalize_base_url(&base_url).to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one user message and decode the assistant's reply.
    pub async fn send_message(&self, message: &str) -> Result<AssistantReply, GatewayError> {
        let url = construct_api_url(&self.base_url, "chat");
        debug!(url = %url, "sending chat message");
        let request = ChatRequest {
            message: message.to_string(),
        };
        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "chat request failed in transit");
                GatewayError::Transport(err)
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = extract_error_detail(&body);
            warn!(status = %status, detail = %detail, "backend rejected chat message");
            return Err(GatewayError::Backend { status, detail });
        }
        response.json::<AssistantReply>().await.map_err(|err| {
            warn!(error = %err, "reply body failed to decode");
            GatewayError::Transport(err)
        })
    }

    /// Ask the backend's health endpoint whether it is up.
    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        let url = construct_api_url(&self.base_url, "health");
        debug!(url = %url, "checking backend health");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(GatewayError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Backend {
                status,
                detail: extract_error_detail(&body),
            });
        }
        response
            .json::<HealthStatus>()
            .await
            .map_err(GatewayError::Transport)
    }
}
