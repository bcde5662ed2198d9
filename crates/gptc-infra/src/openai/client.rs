//! OpenAiAssistantsClient -- concrete [`AssistantsClient`] over HTTP.
//!
//! Each trait method is one REST call against the Assistants API. Non-success
//! statuses are mapped to [`ServiceError`] with the service's error message
//! when it sent one. Every call runs inside a `gen_ai.assistants` span.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the `Authorization` header.

use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{Instrument, debug, info_span};

use gptc_core::client::AssistantsClient;
use gptc_observe::genai_attrs::{
    OP_CANCEL_RUN, OP_CREATE_ASSISTANT, OP_CREATE_MESSAGE, OP_CREATE_RUN, OP_CREATE_THREAD,
    OP_LIST_MESSAGES, OP_RETRIEVE_FILE, OP_RETRIEVE_MESSAGE, OP_RETRIEVE_RUN, PROVIDER_OPENAI,
};
use gptc_types::assistant::{Assistant, AssistantSettings, FileObject, Thread};
use gptc_types::error::ServiceError;
use gptc_types::message::{Message, MessageList, MessageRole, NewMessage};
use gptc_types::run::{NewRun, Run};

use super::config::{ASSISTANTS_BETA_HEADER, OpenAiConfig};

/// HTTP client for the OpenAI Assistants API.
///
/// Intentionally does not derive Debug (holds the API key).
pub struct OpenAiAssistantsClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenAiAssistantsClient {
    /// Create a client from connection settings.
    pub fn new(config: OpenAiConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ServiceError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: config.api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with authentication and the Assistants beta header.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, self.url(path))
            .bearer_auth(self.api_key.expose_secret())
            .header("OpenAI-Beta", ASSISTANTS_BETA_HEADER)
    }

    /// Send a request and decode a JSON response body.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ServiceError> {
        let response = builder
            .send()
            .await
            .map_err(|e| ServiceError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Assistants API returned an error status");
            return Err(ServiceError::from_status(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Deserialization(format!("failed to parse response: {e}")))
    }
}

/// Span shared by every Assistants API call.
macro_rules! call_span {
    ($op:expr) => {
        info_span!(
            "gen_ai.assistants",
            gen_ai.system = PROVIDER_OPENAI,
            gen_ai.operation.name = $op,
        )
    };
}

impl AssistantsClient for OpenAiAssistantsClient {
    async fn create_assistant(&self, settings: &AssistantSettings) -> Result<Assistant, ServiceError> {
        let span = info_span!(
            "gen_ai.assistants",
            gen_ai.system = PROVIDER_OPENAI,
            gen_ai.operation.name = OP_CREATE_ASSISTANT,
            gen_ai.request.model = %settings.model,
        );
        let builder = self.request(Method::POST, "/assistants").json(settings);
        self.send(builder).instrument(span).await
    }

    async fn create_thread(&self) -> Result<Thread, ServiceError> {
        let builder = self
            .request(Method::POST, "/threads")
            .json(&serde_json::json!({}));
        self.send(builder).instrument(call_span!(OP_CREATE_THREAD)).await
    }

    async fn create_message(&self, thread_id: &str, content: &str) -> Result<Message, ServiceError> {
        let body = NewMessage {
            role: MessageRole::User,
            content: content.to_string(),
        };
        let builder = self
            .request(Method::POST, &format!("/threads/{thread_id}/messages"))
            .json(&body);
        self.send(builder).instrument(call_span!(OP_CREATE_MESSAGE)).await
    }

    async fn create_run(&self, thread_id: &str, assistant_id: &str) -> Result<Run, ServiceError> {
        let body = NewRun {
            assistant_id: assistant_id.to_string(),
        };
        let builder = self
            .request(Method::POST, &format!("/threads/{thread_id}/runs"))
            .json(&body);
        self.send(builder).instrument(call_span!(OP_CREATE_RUN)).await
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run, ServiceError> {
        let builder = self.request(Method::GET, &format!("/threads/{thread_id}/runs/{run_id}"));
        self.send(builder).instrument(call_span!(OP_RETRIEVE_RUN)).await
    }

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run, ServiceError> {
        let builder = self.request(
            Method::POST,
            &format!("/threads/{thread_id}/runs/{run_id}/cancel"),
        );
        self.send(builder).instrument(call_span!(OP_CANCEL_RUN)).await
    }

    async fn list_messages(&self, thread_id: &str) -> Result<MessageList, ServiceError> {
        let builder = self.request(
            Method::GET,
            &format!("/threads/{thread_id}/messages?order=desc"),
        );
        self.send(builder).instrument(call_span!(OP_LIST_MESSAGES)).await
    }

    async fn retrieve_message(&self, thread_id: &str, message_id: &str) -> Result<Message, ServiceError> {
        let builder = self.request(
            Method::GET,
            &format!("/threads/{thread_id}/messages/{message_id}"),
        );
        self.send(builder).instrument(call_span!(OP_RETRIEVE_MESSAGE)).await
    }

    async fn retrieve_file(&self, file_id: &str) -> Result<FileObject, ServiceError> {
        let builder = self.request(Method::GET, &format!("/files/{file_id}"));
        self.send(builder).instrument(call_span!(OP_RETRIEVE_FILE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> OpenAiAssistantsClient {
        let config = OpenAiConfig::new(SecretString::from("sk-test-key".to_string()))
            .with_base_url(base_url);
        OpenAiAssistantsClient::new(config).unwrap()
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = client("https://proxy.example.com/v1/");
        assert_eq!(
            client.url("/threads/t1/runs"),
            "https://proxy.example.com/v1/threads/t1/runs"
        );
    }

    #[test]
    fn test_request_carries_auth_and_beta_headers() {
        let client = client("https://api.openai.com/v1");
        let request = client
            .request(Method::GET, "/files/file-1")
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "https://api.openai.com/v1/files/file-1");
        assert_eq!(
            request.headers()["authorization"].to_str().unwrap(),
            "Bearer sk-test-key"
        );
        assert_eq!(request.headers()["openai-beta"].to_str().unwrap(), "assistants=v2");
    }
}
