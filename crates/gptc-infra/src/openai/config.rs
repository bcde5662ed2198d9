//! Connection settings for the OpenAI Assistants API.

use std::time::Duration;

use secrecy::SecretString;

use gptc_types::config::DEFAULT_BASE_URL;

/// Value of the `OpenAI-Beta` header the Assistants endpoints require.
pub const ASSISTANTS_BETA_HEADER: &str = "assistants=v2";

/// Configuration for an [`super::OpenAiAssistantsClient`].
///
/// Does NOT derive Debug; the API key stays out of logs.
pub struct OpenAiConfig {
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    /// Bearer credential.
    pub api_key: SecretString,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl OpenAiConfig {
    /// Settings for the public OpenAI endpoint.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            request_timeout: Duration::from_secs(60),
        }
    }

    /// Override the base URL (useful for proxies or compatible services).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
