//! Welcome banner and startup notices.

use std::path::Path;

use console::style;

use gptc_core::input::END_BLANK_LINES;
use gptc_core::instructions::PromptFileProblem;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(model: &str, assistant_name: &str, assistant_id: &str, thread_id: &str) {
    println!();
    println!("  {}", style(assistant_name).cyan().bold());
    println!();
    println!("  {}  {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Assistant:").bold(), style(assistant_id).dim());
    println!("  {}  {}", style("Thread:").bold(), style(thread_id).dim());
    println!();
    println!("  {}", style("Ctrl+C cancels a pending run, Ctrl+D exits").dim());
    println!("  {}", style("---").dim());
    println!();
}

/// Print the input hint shown before each question.
pub fn print_input_hint() {
    println!("Enter text, type Enter {END_BLANK_LINES} times to end input.");
}

/// Tell the user the prompt file was not usable.
pub fn print_prompt_fallback_notice(path: &Path, problem: &PromptFileProblem) {
    println!("{}", prompt_fallback_notice(path, problem));
}

fn prompt_fallback_notice(path: &Path, problem: &PromptFileProblem) -> String {
    match problem {
        PromptFileProblem::Missing => {
            format!("File '{}' not found. Using default prompt.", path.display())
        }
        PromptFileProblem::Unreadable(err) => format!(
            "File '{}' could not be read ({err}). Using default prompt.",
            path.display()
        ),
    }
}
