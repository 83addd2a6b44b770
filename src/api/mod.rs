//! HTTP API: routing, the analyze endpoint, and error responses.

mod analyze;
mod error;
mod routes;

pub use error::AnalyzeError;
pub use routes::{router, serve, AppState};
