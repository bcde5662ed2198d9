//! Assistant instruction resolution.
//!
//! Priority:
//! 1. `--instructions` given on the command line
//! 2. contents of the prompt file (`system_prompt.txt` by default)
//! 3. the built-in default instructions
//!
//! Falling back never fails; the caller is told which source won so it can
//! warn the user.

use std::path::{Path, PathBuf};

use gptc_types::config::DEFAULT_INSTRUCTIONS;

/// Where the resolved instructions came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstructionsSource {
    CommandLine,
    File(PathBuf),
    /// The prompt file could not be used.
    Default {
        path: PathBuf,
        problem: PromptFileProblem,
    },
}

/// Why the prompt file was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptFileProblem {
    Missing,
    /// The path exists but reading it failed; holds the I/O error text.
    Unreadable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstructions {
    pub text: String,
    pub source: InstructionsSource,
}

impl ResolvedInstructions {
    /// Whether the built-in default had to be used.
    #[cfg(test)]
    fn is_fallback(&self) -> bool {
        matches!(self.source, InstructionsSource::Default { .. })
    }
}

/// Resolve the instructions for the assistant.
pub async fn resolve_instructions(
    command_line: Option<String>,
    prompt_file: &Path,
) -> ResolvedInstructions {
    if let Some(text) = command_line {
        return ResolvedInstructions {
            text,
            source: InstructionsSource::CommandLine,
        };
    }

    match tokio::fs::read_to_string(prompt_file).await {
        Ok(text) => {
            tracing::debug!("Loaded instructions from {}", prompt_file.display());
            ResolvedInstructions {
                text,
                source: InstructionsSource::File(prompt_file.to_path_buf()),
            }
        }
        Err(err) => {
            let problem = if err.kind() == std::io::ErrorKind::NotFound {
                tracing::debug!("No prompt file at {}, using default instructions", prompt_file.display());
                PromptFileProblem::Missing
            } else {
                tracing::warn!("Failed to read {}: {err}, using default instructions", prompt_file.display());
                PromptFileProblem::Unreadable(err.to_string())
            };
            ResolvedInstructions {
                text: DEFAULT_INSTRUCTIONS.to_string(),
                source: InstructionsSource::Default {
                    path: prompt_file.to_path_buf(),
                    problem,
                },
            }
        }
    }
}
