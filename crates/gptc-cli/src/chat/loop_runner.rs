//! Main chat loop orchestration.
//!
//! Resolves the instructions, creates the assistant and thread, then reads
//! questions until input ends. Each question is one run.
//!
//! One Ctrl+C listener lives for the whole loop. During a turn the first
//! Ctrl+C cancels that turn and keeps the session alive, and a second one
//! abandons it. Outside a turn Ctrl+C ends the session.

use std::future::Future;

use console::style;
use secrecy::SecretString;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use gptc_core::error::ChatError;
use gptc_core::instructions::{InstructionsSource, resolve_instructions};
use gptc_core::poll::PollPolicy;
use gptc_core::session::{ConversationSession, TurnOutcome};
use gptc_infra::openai::{OpenAiAssistantsClient, OpenAiConfig};
use gptc_types::assistant::AssistantSettings;

use crate::settings::ChatSettings;

use super::banner::{print_input_hint, print_prompt_fallback_notice, print_welcome_banner};
use super::input::{ChatInput, Question};
use super::renderer::ChatRenderer;

/// Run the interactive chat loop until input ends.
///
/// Service errors end the loop and are returned; problems confined to a
/// single reply are reported and the loop continues.
pub async fn run_chat_loop(
    settings: &ChatSettings,
    instructions_override: Option<String>,
    api_key: SecretString,
) -> anyhow::Result<()> {
    let instructions = resolve_instructions(instructions_override, &settings.prompt_file).await;
    if let InstructionsSource::Default { path, problem } = &instructions.source {
        print_prompt_fallback_notice(path, problem);
    }
    debug!(source = ?instructions.source, "Instructions resolved");

    let client = OpenAiAssistantsClient::new(
        OpenAiConfig::new(api_key).with_base_url(settings.base_url.clone()),
    )?;
    let assistant_settings = AssistantSettings {
        name: settings.assistant_name.clone(),
        instructions: instructions.text,
        model: settings.model.clone(),
    };
    let session =
        ConversationSession::start(client, &assistant_settings, PollPolicy::from(&settings.poll))
            .await?;

    print_welcome_banner(
        &session.assistant().model,
        &settings.assistant_name,
        &session.assistant().id,
        &session.thread().id,
    );

    let renderer = ChatRenderer::new();
    let mut input = ChatInput::new();
    let mut interrupts = spawn_interrupt_listener();
    let mut turns = 0u32;

    loop {
        print_input_hint();
        let Some(question) = or_interrupt(input.read_question(), &mut interrupts).await else {
            debug!("Interrupted while waiting for a question");
            break;
        };
        let (text, last) = match question? {
            Question::Text(text) => (text, false),
            Question::Last(text) => (text, true),
            Question::Eof => break,
        };

        if text.trim().is_empty() {
            debug!("Skipping empty question");
            if last {
                break;
            }
            continue;
        }

        let Some(outcome) = run_turn(&session, &renderer, &text, &mut interrupts).await else {
            warn!("Turn abandoned by a second interrupt");
            println!("\n  {} Turn abandoned", style("!").yellow().bold());
            break;
        };
        turns += 1;
        match outcome {
            Ok(outcome) => renderer.print_outcome(&outcome),
            Err(e) if e.is_turn_local() => {
                warn!(error = %e, "Reply could not be shown");
                println!("  {} {e}", style("!").yellow().bold());
            }
            Err(e) => return Err(e.into()),
        }
        renderer.print_rule();

        if last {
            break;
        }
    }

    info!(turns, thread_id = %session.thread().id, "Chat loop finished");
    println!("\n  {}", style("Session ended.").dim());
    Ok(())
}

/// Forward every Ctrl+C for the rest of the process into a channel.
fn spawn_interrupt_listener() -> mpsc::UnboundedReceiver<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

/// Await `fut` unless an interrupt arrives first.
async fn or_interrupt<T>(
    fut: impl Future<Output = T>,
    interrupts: &mut mpsc::UnboundedReceiver<()>,
) -> Option<T> {
    tokio::select! {
        biased;
        Some(()) = interrupts.recv() => None,
        value = fut => Some(value),
    }
}

/// Drive a turn to completion while watching for interrupts.
///
/// The first interrupt fires `cancel` so the turn can cancel its run and
/// return. A second one abandons the turn and yields `None`.
async fn drive_turn<T>(
    turn: impl Future<Output = T>,
    cancel: &CancellationToken,
    interrupts: &mut mpsc::UnboundedReceiver<()>,
) -> Option<T> {
    tokio::pin!(turn);
    loop {
        tokio::select! {
            result = &mut turn => return Some(result),
            Some(()) = interrupts.recv() => {
                if cancel.is_cancelled() {
                    return None;
                }
                debug!("Interrupt received, cancelling the turn");
                cancel.cancel();
            }
        }
    }
}

/// Send one question, printing a dot for every pending status check.
async fn run_turn(
    session: &ConversationSession<OpenAiAssistantsClient>,
    renderer: &ChatRenderer,
    text: &str,
    interrupts: &mut mpsc::UnboundedReceiver<()>,
) -> Option<Result<TurnOutcome, ChatError>> {
    let cancel = CancellationToken::new();
    let mut dots = 0usize;
    let result = drive_turn(
        session.send(text, &cancel, |_run| {
            dots += 1;
            renderer.print_progress_dot();
        }),
        &cancel,
        interrupts,
    )
    .await;

    if dots > 0 {
        println!();
    }
    result
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn first_interrupt_cancels_and_the_turn_finishes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        tx.send(()).unwrap();

        let result = drive_turn(
            async move {
                token.cancelled().await;
                "cancelled run"
            },
            &cancel,
            &mut rx,
        )
        .await;

        assert_eq!(result, Some("cancelled run"));
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn second_interrupt_abandons_the_turn() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        tx.send(()).unwrap();
        tx.send(()).unwrap();

        let result = drive_turn(std::future::pending::<()>(), &cancel, &mut rx).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn turn_without_interrupt_is_not_cancelled() {
        let (_tx, mut rx) = mpsc::unbounded_channel::<()>();
        let cancel = CancellationToken::new();
        let result = drive_turn(async { 7 }, &cancel, &mut rx).await;
        assert_eq!(result, Some(7));
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn interrupt_between_turns_ends_the_wait_for_input() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.send(()).unwrap();
        let result = or_interrupt(std::future::pending::<Question>(), &mut rx).await;
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn input_is_returned_when_no_interrupt_arrives() {
        let (_tx, mut rx) = mpsc::unbounded_channel::<()>();
        let read = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Question::Text("hello".to_string())
        };
        let result = or_interrupt(read, &mut rx).await;
        assert_eq!(result, Some(Question::Text("hello".to_string())));
    }
}
