use crate::dispatcher::{DispatchReply, DispatchRequest, Dispatcher};
use crate::error::{ChatError, Result};
use crate::server::{ErrorEnvelope, CHAT_ROUTE};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

/// How a chat view reaches the prompt dispatcher.
#[async_trait]
pub trait DispatchTransport: Send + Sync {
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchReply>;
}

/// Talks to a dispatcher over HTTP.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), CHAT_ROUTE),
        })
    }
}

#[async_trait]
impl DispatchTransport for HttpTransport {
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchReply> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => match envelope.details {
                    Some(details) => format!("{} ({})", envelope.error, details),
                    None => envelope.error,
                },
                Err(_) => body,
            };
            return Err(ChatError::Transport(format!(
                "Dispatcher returned {}: {}",
                status.as_u16(),
                message
            )));
        }

        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            return Err(ChatError::Transport(envelope.error));
        }

        serde_json::from_str(&body)
            .map_err(|e| ChatError::Transport(format!("Unreadable dispatcher reply: {}", e)))
    }
}

/// Calls a dispatcher in the same process, skipping HTTP.
pub struct LocalTransport {
    dispatcher: Dispatcher,
}

impl LocalTransport {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl DispatchTransport for LocalTransport {
    async fn send(&self, request: &DispatchRequest) -> Result<DispatchReply> {
        self.dispatcher.dispatch(request).await
    }
}
