//! Command-line definitions for the `gptc` binary.
//!
//! Uses clap derive macros. Flags left unset fall back to `gptc.toml` and
//! then to built-in defaults (see [`crate::settings::ChatSettings::resolve`]).

use std::path::PathBuf;

use clap::Parser;

use gptc_infra::config::CONFIG_FILE_NAME;

/// Chat with a hosted assistant from the terminal.
///
/// Type your message, then press Enter twice to send it. Ctrl+D ends the session.
#[derive(Parser, Debug)]
#[command(name = "gptc", version, about, long_about = None)]
pub struct Cli {
    /// Model to use for the assistant [default: gpt-3.5-turbo-1106].
    #[arg(long)]
    pub model: Option<String>,

    /// Instructions for the assistant (overrides the prompt file).
    #[arg(long)]
    pub instructions: Option<String>,

    /// API key for the assistants service.
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the assistants service [default: https://api.openai.com/v1].
    #[arg(long, env = "OPENAI_BASE_URL")]
    pub base_url: Option<String>,

    /// Display name of the assistant persona.
    #[arg(long)]
    pub assistant_name: Option<String>,

    /// File holding the assistant instructions [default: system_prompt.txt].
    #[arg(long)]
    pub prompt_file: Option<PathBuf>,

    /// Optional TOML configuration file.
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// Delay before the first run status check, in milliseconds.
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    /// Longest delay between run status checks, in milliseconds.
    #[arg(long)]
    pub poll_max_interval_ms: Option<u64>,

    /// Cancel a run still pending after this many seconds (0 waits forever).
    #[arg(long)]
    pub poll_timeout_secs: Option<u64>,

    /// Suppress all log output except errors.
    #[arg(long)]
    pub quiet: bool,

    /// Detailed logs on stderr (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_leave_overrides_unset() {
        let cli = Cli::try_parse_from(["gptc"]).unwrap();
        assert!(cli.model.is_none());
        assert!(cli.instructions.is_none());
        assert_eq!(cli.config, PathBuf::from("gptc.toml"));
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_model_and_instructions_flags() {
        let cli = Cli::try_parse_from([
            "gptc",
            "--model",
            "gpt-4o",
            "--instructions",
            "Be terse.",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert_eq!(cli.instructions.as_deref(), Some("Be terse."));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
