//! Candidate model selection and the sequential invocation chain.

use super::{is_model_unsupported, GenerativeClient, LlmError, VisionRequest};

/// Known-good model identifiers tried after the configured one.
const FALLBACK_MODELS: [&str; 3] = ["gemini-1.5-flash", "gemini-2.0-flash", "gemini-1.5-pro"];

/// Build the ordered candidate list: the preferred model first, then the
/// built-in fallbacks, deduplicated preserving first-seen order. Empty
/// entries are skipped.
pub fn candidate_models(preferred: Option<&str>) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for name in preferred.into_iter().chain(FALLBACK_MODELS) {
        if !name.is_empty() && !candidates.iter().any(|c| c == name) {
            candidates.push(name.to_string());
        }
    }
    candidates
}

/// Try each candidate in order, stopping at the first success.
///
/// Only errors naming an invalid or unsupported model identifier advance
/// the chain; anything else (quota, content, transport) propagates
/// immediately. Exhausting the list yields
/// [`LlmError::NoCompatibleModel`] carrying the last observed error.
pub async fn generate_with_candidates(
    client: &dyn GenerativeClient,
    candidates: &[String],
    request: &VisionRequest,
) -> Result<String, LlmError> {
    let mut last_error: Option<LlmError> = None;

    for model in candidates {
        match client.generate(model, request).await {
            Ok(text) => {
                tracing::debug!(model = %model, "model call succeeded");
                return Ok(text);
            }
            Err(error) => {
                if is_model_unsupported(&error.to_string()) {
                    tracing::warn!(model = %model, "model rejected, trying next candidate: {}", error);
                    last_error = Some(error);
                    continue;
                }
                return Err(error);
            }
        }
    }

    let last_error = last_error
        .map(|e| e.to_string())
        .unwrap_or_else(|| "no candidate models configured".to_string());
    Err(LlmError::NoCompatibleModel { last_error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ImagePayload;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Client that replays a scripted sequence of results and counts calls.
    struct ScriptedClient {
        script: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedClient {
        fn new(script: Vec<Result<String, LlmError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerativeClient for ScriptedClient {
        async fn generate(
            &self,
            _model: &str,
            _request: &VisionRequest,
        ) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("scripted client called more times than scripted")
        }
    }

    fn test_request() -> VisionRequest {
        VisionRequest::new(
            "persona",
            "prompt",
            ImagePayload {
                mime_type: "image/png".to_string(),
                data: Bytes::from_static(b"png"),
            },
        )
    }

    fn not_found() -> LlmError {
        LlmError::Api {
            status: 404,
            body: "model is not found for API version v1beta".to_string(),
        }
    }

    #[test]
    fn test_candidates_default_list() {
        assert_eq!(
            candidate_models(None),
            vec!["gemini-1.5-flash", "gemini-2.0-flash", "gemini-1.5-pro"]
        );
    }

    #[test]
    fn test_candidates_preferred_first_and_deduped() {
        assert_eq!(
            candidate_models(Some("gemini-exp")),
            vec![
                "gemini-exp",
                "gemini-1.5-flash",
                "gemini-2.0-flash",
                "gemini-1.5-pro"
            ]
        );
        // A preferred model that duplicates a built-in collapses into it.
        assert_eq!(
            candidate_models(Some("gemini-2.0-flash")),
            vec!["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"]
        );
    }

    #[test]
    fn test_candidates_skip_empty_preferred() {
        assert_eq!(candidate_models(Some("")), candidate_models(None));
    }

    #[test]
    fn test_unsupported_model_advances_chain() {
        let client = ScriptedClient::new(vec![Err(not_found()), Ok("{}".to_string())]);
        let candidates = candidate_models(None);

        let result = tokio_test::block_on(generate_with_candidates(
            &client,
            &candidates,
            &test_request(),
        ));

        assert_eq!(result.unwrap(), "{}");
        assert_eq!(client.call_count(), 2);
    }

    #[test]
    fn test_unrelated_error_stops_immediately() {
        let client = ScriptedClient::new(vec![Err(LlmError::Api {
            status: 500,
            body: "internal error".to_string(),
        })]);
        let candidates = candidate_models(None);

        let result = tokio_test::block_on(generate_with_candidates(
            &client,
            &candidates,
            &test_request(),
        ));

        assert!(matches!(result, Err(LlmError::Api { status: 500, .. })));
        assert_eq!(client.call_count(), 1);
    }

    #[test]
    fn test_exhaustion_reports_last_error() {
        let client = ScriptedClient::new(vec![Err(not_found()), Err(not_found()), Err(not_found())]);
        let candidates = candidate_models(None);

        let result = tokio_test::block_on(generate_with_candidates(
            &client,
            &candidates,
            &test_request(),
        ));

        match result {
            Err(LlmError::NoCompatibleModel { last_error }) => {
                assert!(last_error.contains("not found"));
            }
            other => panic!("expected NoCompatibleModel, got {:?}", other),
        }
        assert_eq!(client.call_count(), 3);
    }
}
