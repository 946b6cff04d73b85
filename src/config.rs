use std::env;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 5000;

/// Runtime configuration, loaded once at process start.
///
/// The relay is non-functional without the upstream values, so the four
/// `AZURE_OPENAI_*` variables are required and missing ones fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted completion API.
    pub endpoint: String,
    /// Credential sent as the `api-key` header on upstream calls.
    pub api_key: String,
    /// Deployment (model) identifier injected into every upstream request.
    pub deployment: String,
    /// Upstream API version, sent as the `api-version` query parameter.
    pub api_version: String,
    /// Port the relay listens on.
    pub port: u16,
    /// Origins allowed by the cross-origin policy.
    pub allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let endpoint = require("AZURE_OPENAI_ENDPOINT")?;
        let api_key = require("AZURE_OPENAI_API_KEY")?;
        let deployment = require("AZURE_OPENAI_DEPLOYMENT_NAME")?;
        let api_version = require("AZURE_OPENAI_API_VERSION")?;

        let port = env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let allowed_origins = match env::var("ALLOWED_ORIGINS") {
            Ok(raw) => parse_origins(&raw),
            Err(_) => default_origins(),
        };

        Ok(Self {
            endpoint,
            api_key,
            deployment,
            api_version,
            port,
            allowed_origins,
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("missing required environment variable {}", name))
}

/// Splits a comma-separated origin list, dropping empty entries.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Dev-server origins the frontend is served from by default.
pub fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:5174".to_string(),
    ]
}
