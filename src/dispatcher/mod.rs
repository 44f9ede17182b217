//! Server-side prompt dispatch.
//!
//! A request carries a transcript and an optional persona or topic id. The
//! dispatcher resolves the prompt profile, windows the transcript, composes a
//! single text prompt and makes exactly one call to the [`Generator`].

mod compose;

pub use compose::{compose_prompt, render_transcript, window, HISTORY_WINDOW};

use crate::error::{ChatError, Result};
use crate::models::{Message, Role};
use crate::prompts::{self, PromptSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// A text-generation backend.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce a completion for `prompt`. Implementations return
    /// `UpstreamEmpty` when the backend answers without text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<String>,
}

impl DispatchRequest {
    /// Validate a raw JSON payload.
    pub fn from_json(payload: &Value) -> Result<Self> {
        match payload.get("messages") {
            Some(Value::Array(_)) => {}
            _ => return Err(ChatError::InvalidRequest("Invalid messages format".into())),
        }
        DispatchRequest::deserialize(payload)
            .map_err(|e| ChatError::InvalidRequest(format!("Malformed request: {}", e)))
    }

    /// Human-readable selector summary for diagnostics.
    pub fn selection(&self) -> String {
        format!(
            "character: {}, topic: {}",
            self.character_id.as_deref().unwrap_or("none"),
            self.topic_id.as_deref().unwrap_or("none")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchReply {
    pub role: Role,
    pub content: String,
}

impl DispatchReply {
    pub fn into_message(self) -> Message {
        Message::assistant(self.content)
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    generator: Arc<dyn Generator>,
}

impl Dispatcher {
    pub fn new(generator: Arc<dyn Generator>) -> Self {
        Self { generator }
    }

    pub fn compose(&self, request: &DispatchRequest) -> (String, PromptSource) {
        let (profile, source) = prompts::resolve(
            request.character_id.as_deref(),
            request.topic_id.as_deref(),
        );
        debug!(profile = profile.id, ?source, "Resolved prompt profile");
        (compose_prompt(profile, &request.messages), source)
    }

    pub async fn dispatch(&self, request: &DispatchRequest) -> Result<DispatchReply> {
        let (prompt, source) = self.compose(request);
        info!(
            messages = request.messages.len(),
            window = window(&request.messages).len(),
            ?source,
            "Dispatching prompt"
        );

        let text = self.generator.generate(&prompt).await.map_err(|e| match e {
            ChatError::UpstreamEmpty | ChatError::UpstreamError(_) => e,
            other => ChatError::UpstreamError(other.to_string()),
        })?;
        if text.trim().is_empty() {
            return Err(ChatError::UpstreamEmpty);
        }

        Ok(DispatchReply {
            role: Role::Assistant,
            content: text,
        })
    }
}
