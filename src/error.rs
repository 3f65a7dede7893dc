//! Error types for the dashboard
//!
//! Uses thiserror for ergonomic error definitions.
//! Every failure is terminal for the operation that hit it; nothing retries.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Dashboard errors
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login rejected by the backend, or no token in its answer
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Session expired or was never valid (HTTP 401)
    #[error("Unauthorized")]
    Unauthorized,

    /// Non-success HTTP status other than 401
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Network / transport errors
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Browser storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// DOM lookup / mutation errors
    #[error("DOM error: {0}")]
    Dom(String),
}

impl DashboardError {
    /// True when the error already went through the global session-expiry path
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, DashboardError::Unauthorized)
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::Http(err.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DashboardError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        DashboardError::Dom(err.as_string().unwrap_or_else(|| format!("{err:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<DashboardError> for wasm_bindgen::JsValue {
    fn from(err: DashboardError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
