//! The blueprint analyze endpoint.
//!
//! Validates the upload, runs the candidate model chain, recovers the JSON
//! payload from the model's reply, and substitutes the deterministic
//! fallback estimate when the upstream call fails on quota.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Json;
use bytes::Bytes;
use serde_json::Value;

use crate::config::Config;
use crate::estimate::build_fallback_estimate;
use crate::llm::{
    candidate_models, extract_json_object, generate_with_candidates, is_quota_exhausted,
    GenerativeClient, ImagePayload, LlmError, VisionRequest,
};

use super::error::AnalyzeError;
use super::routes::AppState;

/// Estimator persona and output-schema contract sent with every request.
const SYSTEM_PROMPT: &str = "\
You are a Senior Construction Estimator and Financial Risk Auditor.
Analyze the blueprint image and project type.
Use quantity take-offs from visible blueprint context and industry-reasonable assumptions.
Prioritize protection against budget overrun risk, material volatility, and labor uncertainty.
Assume the user is a property owner in India.
All monetary values must be in Indian Rupees (INR) as plain numbers (no currency symbols).
Include all major materials relevant to the blueprint in take_offs.
Return ONLY a JSON object with this structure:
{
  \"project_summary\": \"string\",
  \"total_estimated_cost\": number,
  \"confidence_score\": number (0-100),
  \"take_offs\": [{\"item\": \"string\", \"quantity\": \"string\", \"unit_cost\": number, \"total\": number}],
  \"risk_drivers\": [{\"factor\": \"string\", \"severity\": \"High|Medium|Low\", \"impact\": \"string\"}],
  \"market_hedge_strategy\": \"string\"
}
";

/// Per-request prompt built from the project type.
fn build_prompt(project_type: &str) -> String {
    format!(
        "Analyze this {} blueprint for a property-owner-focused cost estimate in India. \
         Return realistic INR take-offs for all major materials, high-risk drivers, and a \
         practical hedge strategy.",
        project_type
    )
}

/// One parsed multipart upload: the blueprint image and its project type.
struct BlueprintUpload {
    content_type: Option<String>,
    project_type: String,
    image: Bytes,
}

/// POST /analyze
pub(super) async fn analyze(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<Value>, AnalyzeError> {
    let upload = read_upload(multipart).await?;
    let value = run_analysis(&state.config, state.client.as_ref(), upload).await?;
    Ok(Json(value))
}

/// Pull the `blueprint` file and `project_type` field out of the form.
async fn read_upload(mut multipart: Multipart) -> Result<BlueprintUpload, AnalyzeError> {
    let mut image: Option<(Option<String>, Bytes)> = None;
    let mut project_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AnalyzeError::InvalidUpload(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("blueprint") => {
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AnalyzeError::InvalidUpload(e.to_string()))?;
                image = Some((content_type, data));
            }
            Some("project_type") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AnalyzeError::InvalidUpload(e.to_string()))?;
                project_type = Some(text);
            }
            _ => {}
        }
    }

    let (content_type, image) = image.ok_or_else(|| {
        AnalyzeError::InvalidUpload("Missing 'blueprint' file field.".to_string())
    })?;
    let project_type = project_type.ok_or_else(|| {
        AnalyzeError::InvalidUpload("Missing 'project_type' form field.".to_string())
    })?;

    Ok(BlueprintUpload {
        content_type,
        project_type,
        image,
    })
}

/// Validate the upload, invoke the model chain, and pick the response
/// source.
///
/// Quota exhaustion is the one failure class absorbed here: it is replaced
/// by the fallback estimate with success status. Everything else surfaces
/// with its taxonomy status, and no upstream call happens at all when
/// validation fails.
async fn run_analysis(
    config: &Config,
    client: &dyn GenerativeClient,
    upload: BlueprintUpload,
) -> Result<Value, AnalyzeError> {
    if config.api_key.is_none() {
        return Err(AnalyzeError::MissingCredential);
    }

    let mime_type = match upload.content_type.as_deref() {
        Some(ct) if ct.starts_with("image/") => ct.to_string(),
        _ => {
            return Err(AnalyzeError::InvalidUpload(
                "Unsupported file type. Please upload an image (PNG/JPG/WebP).".to_string(),
            ))
        }
    };

    let request = VisionRequest::new(
        SYSTEM_PROMPT,
        build_prompt(&upload.project_type),
        ImagePayload {
            mime_type,
            data: upload.image,
        },
    );

    let candidates = candidate_models(config.preferred_model.as_deref());

    match generate_with_candidates(client, &candidates, &request).await {
        Ok(raw_text) => {
            extract_json_object(&raw_text).map_err(|_| AnalyzeError::MalformedModelOutput)
        }
        Err(LlmError::NoCompatibleModel { last_error }) => {
            Err(AnalyzeError::NoCompatibleModel(last_error))
        }
        Err(error) => {
            let message = error.to_string();
            if is_quota_exhausted(&message) {
                tracing::warn!(
                    "quota exhausted upstream, serving fallback estimate: {}",
                    message
                );
                let estimate = build_fallback_estimate(&upload.project_type);
                serde_json::to_value(estimate).map_err(|e| AnalyzeError::Upstream(e.to_string()))
            } else {
                Err(AnalyzeError::Upstream(message))
            }
        }
    }
}
