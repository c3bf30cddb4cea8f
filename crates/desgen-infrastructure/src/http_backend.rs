//! HttpDesignBackend - REST client for the generation backend.
//!
//! Posts the prompt to `/api/design` and decodes the fixed-shape result.
//! Every failure mode (connect error, timeout, non-2xx status, undecodable
//! body) maps uniformly to `BackendUnavailable`; callers never distinguish
//! causes.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use desgen_core::backend::DesignBackend;
use desgen_core::conversation::GenerationResult;
use desgen_core::error::{DesgenError, Result};

const DESIGN_PATH: &str = "/api/design";
const HEALTH_PATH: &str = "/health";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Backend client that talks to the Desgen HTTP API.
#[derive(Clone)]
pub struct HttpDesignBackend {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct DesignRequest<'a> {
    prompt: &'a str,
}

impl HttpDesignBackend {
    /// Creates a client for the backend at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Probes the backend's health endpoint.
    ///
    /// # Errors
    ///
    /// Returns `BackendUnavailable` if the probe fails or returns a
    /// non-success status.
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}{HEALTH_PATH}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| DesgenError::backend_unavailable(err.to_string()))?;

        if !response.status().is_success() {
            return Err(DesgenError::backend_unavailable(format!(
                "health probe returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DesignBackend for HttpDesignBackend {
    async fn generate(&self, prompt: &str) -> Result<GenerationResult> {
        let url = format!("{}{DESIGN_PATH}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&DesignRequest { prompt })
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "design request failed");
                DesgenError::backend_unavailable(err.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(%status, "design request returned non-success status");
            return Err(DesgenError::backend_unavailable(format!(
                "backend returned {status}"
            )));
        }

        response
            .json::<GenerationResult>()
            .await
            .map_err(|err| DesgenError::backend_unavailable(format!("invalid response: {err}")))
    }
}
