//! Generative model client module.
//!
//! This module provides a trait-based abstraction over vision-capable
//! generative models, with the Gemini REST API as the primary
//! implementation, plus the candidate-model fallback chain and best-effort
//! recovery of JSON objects from free-form model output.

mod error;
mod gemini;
mod invoke;
mod recovery;

pub use error::{is_model_unsupported, is_quota_exhausted, LlmError};
pub use gemini::GeminiClient;
pub use invoke::{candidate_models, generate_with_candidates};
pub use recovery::extract_json_object;

use async_trait::async_trait;
use bytes::Bytes;

/// An image attached to a generation request.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    /// Declared MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Raw image bytes as uploaded.
    pub data: Bytes,
}

/// A single vision generation request.
///
/// Carries the fixed system instruction, the per-request prompt, and the
/// uploaded image. The model is asked to constrain its output to JSON;
/// whether it complies is the recovery step's problem.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub system_instruction: String,
    pub prompt: String,
    pub image: ImagePayload,
}

impl VisionRequest {
    /// Create a request from its three parts.
    pub fn new(
        system_instruction: impl Into<String>,
        prompt: impl Into<String>,
        image: ImagePayload,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            prompt: prompt.into(),
            image,
        }
    }
}

/// Trait for vision-capable generative model clients.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Run one generation attempt against the named model, returning the
    /// model's raw text output.
    async fn generate(&self, model: &str, request: &VisionRequest) -> Result<String, LlmError>;
}
