//! OpenAI Assistants API client.
//!
//! [`OpenAiAssistantsClient`] implements [`gptc_core::client::AssistantsClient`]
//! with plain reqwest calls. Connection settings live in [`OpenAiConfig`].

pub mod client;
pub mod config;

pub use self::client::OpenAiAssistantsClient;
pub use self::config::OpenAiConfig;
