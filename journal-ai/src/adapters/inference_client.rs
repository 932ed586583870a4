//! Shared HTTP plumbing for the inference endpoint
//!
//! # API Reference
//! - Endpoint: `POST {base_url}/models/{model}`
//! - Body: `{"inputs": <string | [string]>, "options": {"wait_for_model": true}}`
//! - Auth: optional `Authorization: Bearer <token>`

use crate::types::AdapterError;
use journal_common::config::BackendConfig;
use reqwest::{header, Client};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// User-Agent header sent with every request
const USER_AGENT: &str = concat!("journal-ai/", env!("CARGO_PKG_VERSION"));

/// Thin JSON-over-HTTP client bound to one inference endpoint
#[derive(Clone)]
pub struct InferenceClient {
    http_client: Client,
    base_url: String,
}

impl InferenceClient {
    /// Create client from backend configuration
    pub fn new(config: &BackendConfig) -> Result<Self, AdapterError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(USER_AGENT),
        );
        if let Some(token) = config.api_token.as_deref().filter(|t| !t.trim().is_empty()) {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token.trim()))
                .map_err(|e| AdapterError::Config(format!("Invalid API token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| AdapterError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Endpoint URL for a model
    pub fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    /// Run a model on the given inputs and return the raw JSON response
    pub async fn infer(&self, model: &str, inputs: Value) -> Result<Value, AdapterError> {
        let url = self.model_url(model);
        debug!(model = %model, "Calling inference endpoint");

        let response = self
            .http_client
            .post(&url)
            .json(&json!({
                "inputs": inputs,
                "options": { "wait_for_model": true },
            }))
            .send()
            .await
            .map_err(|e| AdapterError::Network(format!("Inference request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AdapterError::Api { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(format!("Inference response from {} is not JSON: {}", model, e)))
    }
}
