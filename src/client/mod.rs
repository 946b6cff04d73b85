//! In-memory chat session and the client that talks to the relay.

use anyhow::{anyhow, Result};
use log::{debug, error};
use reqwest::Client;
use serde_json::{json, Value};

use crate::web::models::{Message, Role};

/// System prompt sent ahead of every user turn.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant that helps people find information.";

/// One turn of the conversation as displayed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// Ordered, append-only log of turns for a single session.
///
/// Lives only in memory; `clear` discards everything and there is no way to
/// recover a cleared session.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            text: text.into(),
        });
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Client for the relay's `/api/chat` endpoint.
pub struct ChatClient {
    base_url: String,
    client: Client,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: Client::new(),
        }
    }

    /// Sends one user turn to the relay and appends the reply as an
    /// assistant turn. Empty (trimmed) input is a no-op.
    ///
    /// The user turn is appended before the network call and stays in the
    /// session whatever happens next; a failed call appends an assistant
    /// turn carrying the error text instead of a reply. Errors never
    /// propagate out, so one failure never blocks later sends.
    pub async fn send_message(&self, session: &mut ChatSession, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        session.append(Role::User, text);

        let request = json!({
            "messages": [
                Message {
                    role: Role::System,
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: Role::User,
                    content: text.to_string(),
                },
            ]
        });

        let reply = match self.post_chat(&request).await {
            Ok(body) => extract_reply(&body),
            Err(e) => {
                error!("Error fetching data from backend: {}", e);
                format!("Error connecting to backend: {}", e)
            }
        };

        session.append(Role::Assistant, reply);
    }

    async fn post_chat(&self, request: &Value) -> Result<Value> {
        let url = format!("{}/api/chat", self.base_url);
        debug!("Sending to URL: {}", url);

        let response = self.client.post(&url).json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Backend error {}: {}", status, body));
        }

        Ok(response.json().await?)
    }
}

/// Extracts the assistant reply, tolerating the response shapes different
/// backends produce. Extractors run in priority order and the first
/// non-empty string wins; an unrecognized body is shown raw.
pub fn extract_reply(body: &Value) -> String {
    const EXTRACTORS: [fn(&Value) -> Option<&str>; 4] = [
        flat_text,
        nested_choice_message,
        nested_choice_content,
        flat_reply,
    ];

    EXTRACTORS
        .iter()
        .filter_map(|extract| extract(body))
        .find(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

fn flat_text(v: &Value) -> Option<&str> {
    v.get("text")?.as_str()
}

fn nested_choice_message(v: &Value) -> Option<&str> {
    v.get("choices")?.get(0)?.get("message")?.get("content")?.as_str()
}

fn nested_choice_content(v: &Value) -> Option<&str> {
    v.get("choices")?.get(0)?.get("content")?.as_str()
}

fn flat_reply(v: &Value) -> Option<&str> {
    v.get("reply")?.as_str()
}
