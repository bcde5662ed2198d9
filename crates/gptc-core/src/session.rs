//! Conversation session: one assistant and one thread, driven turn by turn.
//!
//! `ConversationSession` owns the remote handles created at startup and the
//! client used to reach them. Each call to [`ConversationSession::send`] is
//! one user turn: append the message, start a run, wait for it, and fetch the
//! reply when the run completed.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use gptc_types::assistant::{Assistant, AssistantSettings, Thread};
use gptc_types::error::ServiceError;
use gptc_types::message::{Annotation, MessageContent};
use gptc_types::run::{LastError, Run, RunStatus};

use crate::citation::rewrite_citations;
use crate::client::AssistantsClient;
use crate::error::ChatError;
use crate::poll::{PollOutcome, PollPolicy, wait_for_run};

/// What the assistant answered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Markdown body with citations rewritten and footnoted.
    Markdown(String),
    /// Id of an image file; the image itself is not downloaded.
    ImageFile(String),
}

/// How a single turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The run completed and the newest message was rendered.
    Replied(Reply),
    /// The run completed but the thread had nothing to show.
    NoReply,
    /// The run failed on the service side.
    Failed {
        run_id: String,
        last_error: Option<LastError>,
    },
    /// The run stopped in some other non-pending state (cancelled, expired, ...).
    Ended { run_id: String, status: RunStatus },
    /// The poll timeout elapsed; the run was asked to cancel.
    TimedOut { run_id: String },
    /// The caller cancelled the wait; the run was asked to cancel.
    Cancelled { run_id: String },
}

/// A live conversation with one remote assistant over one thread.
pub struct ConversationSession<C> {
    client: C,
    assistant: Assistant,
    thread: Thread,
    policy: PollPolicy,
}

impl<C: AssistantsClient> ConversationSession<C> {
    /// Create the assistant and the thread used for the rest of the process.
    pub async fn start(
        client: C,
        settings: &AssistantSettings,
        policy: PollPolicy,
    ) -> Result<Self, ServiceError> {
        let assistant = client.create_assistant(settings).await?;
        let thread = client.create_thread().await?;
        info!(
            assistant_id = %assistant.id,
            thread_id = %thread.id,
            model = %assistant.model,
            "Conversation session started"
        );
        Ok(Self {
            client,
            assistant,
            thread,
            policy,
        })
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    #[cfg(test)]
    fn client(&self) -> &C {
        &self.client
    }

    /// Run one user turn.
    ///
    /// `on_pending` is called for every status check that finds the run still
    /// pending. Cancelling `cancel` stops the wait and cancels the run.
    pub async fn send<F>(
        &self,
        text: &str,
        cancel: &CancellationToken,
        on_pending: F,
    ) -> Result<TurnOutcome, ChatError>
    where
        F: FnMut(&Run),
    {
        let span = info_span!("turn", thread_id = %self.thread.id, chars = text.chars().count());
        self.send_inner(text, cancel, on_pending).instrument(span).await
    }

    async fn send_inner<F>(
        &self,
        text: &str,
        cancel: &CancellationToken,
        on_pending: F,
    ) -> Result<TurnOutcome, ChatError>
    where
        F: FnMut(&Run),
    {
        let message = self.client.create_message(&self.thread.id, text).await?;
        debug!(message_id = %message.id, "User message appended");

        let run = self
            .client
            .create_run(&self.thread.id, &self.assistant.id)
            .await?;
        debug!(run_id = %run.id, status = %run.status, "Run created");

        let outcome = wait_for_run(&self.client, run, &self.policy, cancel, on_pending).await?;

        let run = match outcome {
            PollOutcome::Finished(run) => run,
            PollOutcome::TimedOut(run) => {
                warn!(run_id = %run.id, "Run did not finish before the poll timeout");
                self.cancel_run(&run).await;
                return Ok(TurnOutcome::TimedOut { run_id: run.id });
            }
            PollOutcome::Cancelled(run) => {
                info!(run_id = %run.id, "Run wait cancelled by user");
                self.cancel_run(&run).await;
                return Ok(TurnOutcome::Cancelled { run_id: run.id });
            }
        };

        match run.status {
            RunStatus::Completed => {
                info!(run_id = %run.id, "Run completed");
                let reply = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        info!(run_id = %run.id, "Reply fetch cancelled by user");
                        return Ok(TurnOutcome::Cancelled { run_id: run.id });
                    }
                    reply = self.fetch_reply() => reply?,
                };
                Ok(match reply {
                    Some(reply) => TurnOutcome::Replied(reply),
                    None => TurnOutcome::NoReply,
                })
            }
            RunStatus::Failed => {
                warn!(run_id = %run.id, last_error = ?run.last_error, "Run failed");
                Ok(TurnOutcome::Failed {
                    run_id: run.id,
                    last_error: run.last_error,
                })
            }
            status => {
                warn!(run_id = %run.id, %status, "Run ended without completing");
                Ok(TurnOutcome::Ended {
                    run_id: run.id,
                    status,
                })
            }
        }
    }

    /// Fetch and render the newest message of the thread.
    ///
    /// The newest message is re-fetched by id before rendering, and only its
    /// first content item is shown.
    pub async fn fetch_reply(&self) -> Result<Option<Reply>, ChatError> {
        let list = self.client.list_messages(&self.thread.id).await?;
        let Some(newest) = list.data.first() else {
            debug!("Thread has no messages");
            return Ok(None);
        };

        let message = self
            .client
            .retrieve_message(&self.thread.id, &newest.id)
            .await?;

        match message.content.first() {
            None => Ok(None),
            Some(MessageContent::Text { text }) => {
                let filenames = self.resolve_filenames(&text.annotations).await?;
                Ok(Some(Reply::Markdown(rewrite_citations(text, &filenames))))
            }
            Some(MessageContent::ImageFile { image_file }) => {
                Ok(Some(Reply::ImageFile(image_file.file_id.clone())))
            }
            Some(MessageContent::Unsupported) => Err(ChatError::UnsupportedContent {
                message_id: message.id,
            }),
        }
    }

    /// Look up the display name of every file the annotations cite.
    ///
    /// Each distinct file id is fetched once.
    async fn resolve_filenames(
        &self,
        annotations: &[Annotation],
    ) -> Result<HashMap<String, String>, ServiceError> {
        let mut filenames = HashMap::new();
        for file_id in annotations.iter().filter_map(Annotation::file_id) {
            if filenames.contains_key(file_id) {
                continue;
            }
            let file = self.client.retrieve_file(file_id).await?;
            filenames.insert(file_id.to_string(), file.filename);
        }
        Ok(filenames)
    }

    /// Ask the service to cancel `run`. Failure is logged, not returned.
    async fn cancel_run(&self, run: &Run) {
        match self.client.cancel_run(&run.thread_id, &run.id).await {
            Ok(cancelled) => debug!(run_id = %cancelled.id, status = %cancelled.status, "Run cancel requested"),
            Err(e) => warn!(run_id = %run.id, error = %e, "Failed to cancel run"),
        }
    }
}
