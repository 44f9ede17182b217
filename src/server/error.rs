use crate::error::ChatError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

/// Headline returned for every failed dispatch.
pub const DISPATCH_FAILURE: &str = "Failed to get wisdom. Please try asking again.";

/// Uniform failure body: `{ "error": ..., "details": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub envelope: ErrorEnvelope,
}

impl ApiError {
    /// Every dispatcher failure maps to the same status and headline; only
    /// `details` differs.
    pub fn dispatch(err: &ChatError, selection: Option<&str>) -> Self {
        let details = match selection {
            Some(selection) => format!("{} ({})", err, selection),
            None => err.to_string(),
        };
        error!(kind = err.kind(), %details, "Dispatch failed");

        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: ErrorEnvelope {
                error: DISPATCH_FAILURE.to_string(),
                details: Some(details),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
