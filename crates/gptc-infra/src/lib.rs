//! Infrastructure layer for gptc.
//!
//! Contains the implementation of the [`gptc_core::client::AssistantsClient`]
//! port over HTTP (reqwest against the OpenAI Assistants API) and the loader
//! for the optional `gptc.toml` configuration file.

pub mod config;
pub mod openai;
