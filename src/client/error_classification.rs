//! Error classification logic

use crate::transport::RawResponse;
use crate::Error;

/// Map an HTTP status to a coarse error class label.
pub(crate) fn error_class_for_status(status: u16) -> &'static str {
    match status {
        400 | 422 => "invalid_request",
        401 => "authentication",
        403 => "permission_denied",
        404 => "not_found",
        408 => "timeout",
        413 => "request_too_large",
        429 => "rate_limited",
        500..=599 => "server_error",
        _ => "http_error",
    }
}

/// Human-readable message from an error body.
///
/// Understands the OpenAI shape (`{"error": {"message": ..}}`), a bare string
/// `error`, and the array-wrapped form Gemini returns for some failures
/// (`[{"error": {..}}]`). Falls back to the raw body text.
pub(crate) fn error_message_from_body(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        let root = match &json {
            serde_json::Value::Array(items) => items.first().unwrap_or(&json),
            _ => &json,
        };
        if let Some(err) = root.get("error") {
            if let Some(msg) = err.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(msg) = err.as_str() {
                return msg.to_string();
            }
        }
        if let Some(msg) = root.get("message").and_then(|m| m.as_str()) {
            return msg.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Convert a non-2xx response into [`Error::Remote`].
pub(crate) fn remote_error(resp: &RawResponse) -> Error {
    Error::Remote {
        status: resp.status,
        class: error_class_for_status(resp.status).to_string(),
        message: error_message_from_body(&resp.body),
    }
}
