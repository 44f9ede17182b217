use crate::error::{ChatError, Result};
use serde_json::Value;

/// Extract the generated text from a non-streaming `generateContent` response.
///
/// Text parts of the first candidate are concatenated. `Ok(None)` means the
/// model answered without any text (for example a safety block).
pub fn extract_text(response_json: &Value) -> Result<Option<String>> {
    if let Some(message) = extract_error(response_json) {
        return Err(ChatError::UpstreamError(message));
    }

    let candidates = match response_json.get("candidates").and_then(|c| c.as_array()) {
        Some(candidates) => candidates,
        None => return Ok(None),
    };

    let parts = match candidates
        .first()
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        Some(parts) => parts,
        None => return Ok(None),
    };

    let text: String = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// Extract the error message from an error payload, if the response is one.
pub fn extract_error(response_json: &Value) -> Option<String> {
    response_json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
}

/// Reason the model stopped, when reported (e.g. "STOP", "SAFETY").
pub fn extract_finish_reason(response_json: &Value) -> Option<String> {
    response_json
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("finishReason"))
        .and_then(|r| r.as_str())
        .map(|s| s.to_string())
}
