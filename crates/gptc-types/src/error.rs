use thiserror::Error;

/// Errors from calls to the hosted Assistants service.
///
/// These are not handled per call: they propagate to the binary and end the
/// process after being printed.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl ServiceError {
    /// Map a non-success HTTP status and its body to a service error.
    ///
    /// The body is an OpenAI-style `{"error": {"message": ...}}` envelope when
    /// the service produced it; otherwise the raw text is kept.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.to_string());

        match status {
            401 | 403 => ServiceError::AuthenticationFailed(message),
            404 => ServiceError::NotFound(message),
            429 => ServiceError::RateLimited(message),
            _ => ServiceError::Api { status, message },
        }
    }
}
