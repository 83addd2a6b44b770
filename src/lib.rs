//! # Blueprint Estimator
//!
//! An HTTP service that turns an uploaded blueprint image into a structured
//! construction cost estimate.
//!
//! This library provides:
//! - An HTTP API accepting a blueprint upload and a project-type label
//! - A Gemini-backed vision call with a fixed estimator prompt
//! - A deterministic fallback estimate served during quota outages
//!
//! ## Request Flow
//! 1. Receive blueprint + project type via `POST /analyze`
//! 2. Try each candidate Gemini model in priority order
//! 3. Recover the JSON object from the model's free-form reply
//! 4. On quota exhaustion, substitute the deterministic fallback estimate
//!
//! ## Modules
//! - `api`: routing, the analyze endpoint, and error responses
//! - `llm`: generative model client, candidate chain, response recovery
//! - `estimate`: the cost estimate contract and fallback estimator

pub mod api;
pub mod config;
pub mod estimate;
pub mod llm;

pub use config::Config;
