//! Effective chat settings.
//!
//! Priority for every field: command-line flag, then `gptc.toml`, then the
//! built-in default.

use std::path::PathBuf;

use gptc_types::config::{
    ChatConfig, DEFAULT_ASSISTANT_NAME, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PROMPT_FILE,
    PollConfig,
};

use crate::cli::Cli;

/// Settings the chat loop runs with, after merging all sources.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatSettings {
    pub model: String,
    pub assistant_name: String,
    pub prompt_file: PathBuf,
    pub base_url: String,
    pub poll: PollConfig,
}

impl ChatSettings {
    pub fn resolve(cli: &Cli, config: ChatConfig) -> Self {
        let ChatConfig {
            model,
            assistant_name,
            prompt_file,
            base_url,
            mut poll,
        } = config;

        if let Some(interval_ms) = cli.poll_interval_ms {
            poll.interval_ms = interval_ms;
        }
        if let Some(max_interval_ms) = cli.poll_max_interval_ms {
            poll.max_interval_ms = max_interval_ms;
        }
        if let Some(timeout_secs) = cli.poll_timeout_secs {
            poll.timeout_secs = timeout_secs;
        }

        Self {
            model: cli
                .model
                .clone()
                .or(model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            assistant_name: cli
                .assistant_name
                .clone()
                .or(assistant_name)
                .unwrap_or_else(|| DEFAULT_ASSISTANT_NAME.to_string()),
            prompt_file: cli
                .prompt_file
                .clone()
                .or_else(|| prompt_file.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPT_FILE)),
            base_url: cli
                .base_url
                .clone()
                .or(base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            poll,
        }
    }
}
