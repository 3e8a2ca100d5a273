//! Trend service error types.

/// Errors that can occur while talking to the trend matching service.
#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Trend service error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Failed to deserialize the service response
    #[error("Failed to deserialize trend service response: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl TrendError {
    /// Message suitable for showing inline in the trends panel.
    ///
    pub fn user_message(&self) -> String {
        match self {
            TrendError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
