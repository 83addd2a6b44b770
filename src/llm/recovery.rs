//! Best-effort recovery of a JSON object from free-form model output.

use serde_json::Value;

use super::LlmError;

/// Extract a single JSON value from `raw`.
///
/// Tries the whole trimmed text first; if that fails, tries the span from
/// the first `{` to the last `}` inclusive, which strips prose and code
/// fences around a single object. Anything less well-formed is rejected
/// rather than guessed at, so text containing two adjacent objects fails
/// (the full span is not one valid value).
pub fn extract_json_object(raw: &str) -> Result<Value, LlmError> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            if let Ok(value) = serde_json::from_str(&trimmed[start..=end]) {
                return Ok(value);
            }
        }
    }

    Err(LlmError::MalformedOutput)
}
