//! HTTP client for the agent service

use crate::{
    error::{Error, Result},
    types::{InteractRequest, InteractResponse},
};

/// Default service address when `COACH_API_URL` is unset
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Environment variable holding the service base URL
pub const API_URL_ENV_VAR: &str = "COACH_API_URL";

/// Client for the agent interaction endpoint
#[derive(Debug, Clone)]
pub struct AgentClient {
    client: reqwest::Client,
    base_url: String,
}

impl AgentClient {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client from `COACH_API_URL`, falling back to the local
    /// development address
    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one message to the agent service and return its typed reply.
    ///
    /// Fails with [`Error::Http`] on transport problems, [`Error::Status`]
    /// on a non-2xx reply, and [`Error::Decode`] when the body does not
    /// match [`InteractResponse`]. The caller decides what the user sees.
    pub async fn interact(&self, request: &InteractRequest) -> Result<InteractResponse> {
        let url = format!("{}/agents/interact", self.base_url);
        tracing::debug!(url = %url, user_id = %request.user_id, "agent interact request");

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        tracing::debug!(status = %status, "agent interact response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
