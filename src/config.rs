//! Process configuration captured from the environment at startup.
//!
//! Values are read once into a [`Config`] and handed to the API state
//! explicitly, so handlers never consult the environment at call time.

/// Runtime configuration for the service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gemini API credential. When absent, analyze requests fail fast
    /// without any upstream call.
    pub api_key: Option<String>,
    /// Preferred model identifier, tried before the built-in candidates.
    pub preferred_model: Option<String>,
    /// Bind host for the HTTP server.
    pub host: String,
    /// Bind port for the HTTP server.
    pub port: u16,
}

impl Config {
    /// Build a config from environment variables:
    /// - `GEMINI_API_KEY` - credential for the generative API
    /// - `GEMINI_MODEL` - preferred model identifier (optional)
    /// - `HOST` / `PORT` - bind address, default `0.0.0.0:8000`
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("GEMINI_API_KEY"),
            preferred_model: non_empty_var("GEMINI_MODEL"),
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
        }
    }
}

/// Read an environment variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
