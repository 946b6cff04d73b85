use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body accepted by `POST /api/chat`.
///
/// `messages` is deliberately untyped: the relay performs no schema
/// validation, so whatever JSON value arrives is forwarded verbatim and a
/// malformed sequence surfaces as an upstream error.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

/// One role/content pair on the wire.
#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}
