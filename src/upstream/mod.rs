use anyhow::{anyhow, Result};
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::Config;

/// Client for the hosted chat-completion API.
///
/// Speaks the Azure OpenAI deployment wire shape: completions live under
/// `/openai/deployments/{deployment}/chat/completions` and the credential
/// travels in an `api-key` header.
pub struct CompletionClient {
    url: String,
    api_key: String,
    deployment: String,
    client: Client,
}

impl CompletionClient {
    pub fn new(config: &Config) -> Self {
        let url = completions_url(&config.endpoint, &config.deployment, &config.api_version);

        info!("Using completion API at: {}", config.endpoint);

        Self {
            url,
            api_key: config.api_key.clone(),
            deployment: config.deployment.clone(),
            client: Client::new(),
        }
    }

    /// Forwards a message sequence verbatim, with the configured deployment
    /// injected as the model, and returns the raw response body.
    ///
    /// Single attempt: any failure (connect, auth, non-2xx, unreadable body)
    /// comes back as an error for the caller to surface. No retry.
    pub async fn complete(&self, messages: Value) -> Result<Value> {
        let payload = json!({
            "model": self.deployment,
            "messages": messages,
        });
        debug!("Payload: {}", payload);

        let response = self
            .client
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow!("API request failed ({}): {}", status, error_text));
        }

        let body: Value = response.json().await?;
        debug!("Response JSON: {}", body);

        Ok(body)
    }
}

fn completions_url(endpoint: &str, deployment: &str, api_version: &str) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        endpoint.trim_end_matches('/'),
        deployment,
        api_version
    )
}
