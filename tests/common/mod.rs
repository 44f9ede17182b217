#![allow(dead_code)]

use async_trait::async_trait;
use persona_chat::dispatcher::{DispatchReply, DispatchRequest, Generator};
use persona_chat::error::{ChatError, Result};
use persona_chat::session::DispatchTransport;
use std::sync::Mutex;

/// Generator that records every prompt and answers with a fixed reply.
pub struct RecordingGenerator {
    reply: Option<String>,
    pub prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Backend that fails outright.
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> String {
        self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl Generator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ChatError::UpstreamError("connection reset".to_string())),
        }
    }
}

/// Transport that answers from a script and keeps the requests it saw.
pub struct ScriptedTransport {
    replies: Mutex<Vec<Result<DispatchReply>>>,
    pub requests: Mutex<Vec<DispatchRequest>>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Result<DispatchReply>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn last_request(&self) -> Option<DispatchRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl DispatchTransport for ScriptedTransport {
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchReply> {
        self.requests.lock().unwrap().push(request.clone());
        let mut replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            return Err(ChatError::Transport("no scripted reply".to_string()));
        }
        replies.remove(0)
    }
}
