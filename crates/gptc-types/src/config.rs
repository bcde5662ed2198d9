//! Configuration types for gptc.
//!
//! `ChatConfig` represents the optional `gptc.toml` in the working directory.
//! Every field is optional; command-line flags override whatever is set here
//! and built-in defaults fill the rest.

use serde::{Deserialize, Serialize};

/// Model used when neither the flag nor the config file names one.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-1106";

/// Persona name given to the remote assistant.
pub const DEFAULT_ASSISTANT_NAME: &str = "Code Lingo Assistant";

/// Instructions used when no override and no prompt file are available.
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant.";

/// Instructions file read from the working directory.
pub const DEFAULT_PROMPT_FILE: &str = "system_prompt.txt";

/// Root of the hosted Assistants API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Top-level contents of `gptc.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub model: Option<String>,

    #[serde(default)]
    pub assistant_name: Option<String>,

    #[serde(default)]
    pub prompt_file: Option<String>,

    #[serde(default)]
    pub base_url: Option<String>,

    #[serde(default)]
    pub poll: PollConfig,
}

/// How a pending run is polled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Delay before the first status check, in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Upper bound on the delay between checks, in milliseconds.
    #[serde(default = "default_max_interval_ms")]
    pub max_interval_ms: u64,

    /// Factor applied to the delay after every pending check.
    #[serde(default = "default_backoff")]
    pub backoff: f64,

    /// Give up (and cancel the run) after this many seconds. `0` waits forever.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_interval_ms() -> u64 {
    1_000
}

fn default_max_interval_ms() -> u64 {
    8_000
}

fn default_backoff() -> f64 {
    1.5
}

fn default_timeout_secs() -> u64 {
    600
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            max_interval_ms: default_max_interval_ms(),
            backoff: default_backoff(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
