//! Question input for the chat loop.
//!
//! On a terminal, each question is read through `rustyline_async::Readline`
//! with a `You >` prompt and a continuation prompt. The readline (and its raw
//! terminal mode) lives only while a question is being typed, so replies are
//! printed to a normal terminal. Piped stdin is read line by line instead.
//!
//! Lines are fed to [`QuestionCollector`]; two blank lines end a question.

use std::io::IsTerminal;

use console::style;
use rustyline_async::{Readline, ReadlineEvent};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use gptc_core::input::{Feed, QuestionCollector};

/// What the user handed over.
#[derive(Debug, PartialEq, Eq)]
pub enum Question {
    /// A complete question; more may follow.
    Text(String),
    /// Input ended after this partial question; send it, then stop.
    Last(String),
    /// Input ended (Ctrl+D, Ctrl+C at the prompt, or closed stdin).
    Eof,
}

impl Question {
    fn from_end_of_input(collector: QuestionCollector) -> Self {
        match collector.finish() {
            Some(text) => Question::Last(text),
            None => Question::Eof,
        }
    }
}

enum LineSource {
    Terminal,
    Piped(Lines<BufReader<Stdin>>),
}

/// Reads questions from stdin.
pub struct ChatInput {
    source: LineSource,
}

impl ChatInput {
    /// Pick the terminal or piped reader depending on what stdin is.
    pub fn new() -> Self {
        let source = if std::io::stdin().is_terminal() {
            LineSource::Terminal
        } else {
            LineSource::Piped(BufReader::new(tokio::io::stdin()).lines())
        };
        Self { source }
    }

    /// Read lines until a question is complete or input ends.
    pub async fn read_question(&mut self) -> anyhow::Result<Question> {
        match &mut self.source {
            LineSource::Terminal => read_from_terminal().await,
            LineSource::Piped(lines) => read_from_lines(lines).await,
        }
    }
}

fn first_prompt() -> String {
    format!("  {} ", style("You >").green().bold())
}

fn continuation_prompt() -> String {
    format!("  {} ", style("  ...").dim())
}

async fn read_from_terminal() -> anyhow::Result<Question> {
    let (mut rl, _writer) = Readline::new(first_prompt())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;
    let mut collector = QuestionCollector::new();

    let question = loop {
        match rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                if let Feed::Complete(text) = collector.push(line) {
                    break Question::Text(text);
                }
                let _ = rl.update_prompt(&continuation_prompt());
            }
            Ok(ReadlineEvent::Eof) | Ok(ReadlineEvent::Interrupted) => {
                break Question::from_end_of_input(collector);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Readline closed");
                break Question::from_end_of_input(collector);
            }
        }
    };

    let _ = rl.flush();
    Ok(question)
}

async fn read_from_lines(lines: &mut Lines<BufReader<Stdin>>) -> anyhow::Result<Question> {
    let mut collector = QuestionCollector::new();
    while let Some(line) = lines.next_line().await? {
        if let Feed::Complete(text) = collector.push(line) {
            return Ok(Question::Text(text));
        }
    }
    Ok(Question::from_end_of_input(collector))
}
