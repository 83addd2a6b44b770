//! Error type and text classification for generative model calls.

use thiserror::Error;

/// Errors from the generative model client and its response handling.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The HTTP request itself failed (connect, timeout, ...).
    #[error("request failed: {0}")]
    Network(String),

    /// The API answered with a non-success status. The numeric status is
    /// part of the message so the text classifiers below see it.
    #[error("Gemini API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The API answered 200 but the payload was not usable.
    #[error("failed to parse API response: {0}")]
    Parse(String),

    /// Every candidate model identifier was rejected.
    #[error("no compatible model available; last error: {last_error}")]
    NoCompatibleModel { last_error: String },

    /// The model's text output did not contain a recoverable JSON object.
    #[error("model did not return valid JSON")]
    MalformedOutput,
}

/// True when the error text names a model identifier the API does not
/// serve.
///
/// Matched by substring because the upstream API only exposes this
/// condition through its message text; swap for a structured code if one
/// ever appears.
pub fn is_model_unsupported(text: &str) -> bool {
    let text = text.to_lowercase();
    text.contains("not found") || text.contains("not supported")
}

/// True when the error text signals quota exhaustion or rate limiting.
pub fn is_quota_exhausted(text: &str) -> bool {
    let text = text.to_lowercase();
    text.contains("quota") || text.contains("429") || text.contains("rate limit")
}
