use thiserror::Error;

/// Message shown to the user for any failed turn, whatever the cause.
pub const USER_FACING_FAILURE: &str = "Failed to get wisdom. Please try again.";

#[derive(Debug, Error)]
pub enum ChatError {
    /// Inbound dispatcher payload was malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The generation backend answered but produced no usable text.
    #[error("Empty response from model")]
    UpstreamEmpty,

    /// The generation backend call itself failed.
    #[error("Upstream error: {0}")]
    UpstreamError(String),

    /// Failure between the chat client and the dispatcher.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChatError {
    /// Short machine-friendly label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::InvalidRequest(_) => "invalid_request",
            ChatError::UpstreamEmpty => "upstream_empty",
            ChatError::UpstreamError(_) => "upstream_error",
            ChatError::Transport(_) | ChatError::Http(_) => "transport",
            ChatError::Storage(_) => "storage",
            ChatError::Config(_) => "config",
            ChatError::Io(_) => "io",
            ChatError::Json(_) => "serialization",
        }
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
