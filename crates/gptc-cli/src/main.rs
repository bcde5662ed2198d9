//! gptc: terminal chat client for hosted assistants.
//!
//! Binary name: `gptc`
//!
//! Parses arguments, sets up tracing, merges `gptc.toml` with the flags, and
//! hands over to the chat loop.

mod chat;
mod cli;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use console::style;
use secrecy::SecretString;

use gptc_infra::config::load_chat_config;
use gptc_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};

use cli::Cli;
use settings::ChatSettings;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = run(cli).await;
    shutdown_tracing();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n  {} {e:#}", style("error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_chat_config(&cli.config).await;
    let settings = ChatSettings::resolve(&cli, config);

    let api_key = cli.api_key.clone().map(SecretString::from).ok_or_else(|| {
        anyhow::anyhow!("OPENAI_API_KEY not set. Pass --api-key or export OPENAI_API_KEY")
    })?;

    chat::loop_runner::run_chat_loop(&settings, cli.instructions, api_key).await
}
