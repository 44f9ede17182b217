use crate::api::response::{extract_finish_reason, extract_text};
use crate::api::RequestBody;
use crate::config::{Config, GenerationConfig};
use crate::dispatcher::Generator;
use crate::error::{ChatError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_endpoint: String,
    model: String,
    generation: GenerationConfig,
}

impl GeminiClient {
    pub fn new(
        api_key: &str,
        api_endpoint: &str,
        model: &str,
        generation: GenerationConfig,
        timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|e| ChatError::Config(format!("Invalid API key header: {}", e)))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            generation,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.require_api_key()?,
            &config.api_endpoint,
            &config.model,
            config.generation.clone(),
            Duration::from_secs(config.api_timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_endpoint, self.model)
    }

    pub async fn make_api_request(&self, request_body: &RequestBody) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.generate_url())
            .json(request_body)
            .send()
            .await?;
        Ok(response)
    }

    /// Send a prompt and return the raw JSON body, whatever the status.
    pub async fn generate_raw(&self, prompt: &str) -> Result<(u16, Value)> {
        let request_body = RequestBody::single_turn(prompt, &self.generation);
        let response = self.make_api_request(&request_body).await?;
        let status = response.status().as_u16();
        let body: Value = response.json().await?;
        Ok((status, body))
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request_body = RequestBody::single_turn(prompt, &self.generation);
        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling generation backend");

        let response = self
            .make_api_request(&request_body)
            .await
            .map_err(|e| ChatError::UpstreamError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ChatError::UpstreamError(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| ChatError::UpstreamError(format!("Unreadable response: {}", e)))?;

        match extract_text(&response_json)? {
            Some(text) => Ok(text),
            None => {
                warn!(
                    finish_reason = ?extract_finish_reason(&response_json),
                    "Backend returned no text"
                );
                Err(ChatError::UpstreamEmpty)
            }
        }
    }
}
