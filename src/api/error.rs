//! Error responses for the analyze endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure classes surfaced by the analyze endpoint.
///
/// Quota exhaustion never appears here: the handler absorbs that class and
/// answers with the fallback estimate instead.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The upload was missing, unreadable, or not an image.
    #[error("{0}")]
    InvalidUpload(String),

    /// No API credential configured.
    #[error("Missing GEMINI_API_KEY. Set it in the environment before starting the server.")]
    MissingCredential,

    /// Every candidate model identifier was rejected upstream.
    #[error("No compatible Gemini model available. Last error: {0}")]
    NoCompatibleModel(String),

    /// The model replied, but no JSON object could be recovered.
    #[error("Model did not return valid JSON.")]
    MalformedModelOutput,

    /// Anything else from the upstream call, surfaced verbatim.
    #[error("{0}")]
    Upstream(String),
}

impl AnalyzeError {
    /// HTTP status for this failure class.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidUpload(_) => StatusCode::BAD_REQUEST,
            Self::MissingCredential | Self::NoCompatibleModel(_) | Self::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::MalformedModelOutput => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AnalyzeError::InvalidUpload("bad".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AnalyzeError::MissingCredential.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AnalyzeError::NoCompatibleModel("404".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AnalyzeError::MalformedModelOutput.status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AnalyzeError::Upstream("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_message_preserved() {
        let err = AnalyzeError::Upstream("socket hangup".to_string());
        assert_eq!(err.to_string(), "socket hangup");
    }
}
