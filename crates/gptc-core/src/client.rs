//! AssistantsClient trait definition.
//!
//! This is the seam between the conversation logic and the hosted service.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition); the session is
//! generic over the client so no object-safe wrapper is needed.
//!
//! The HTTP implementation lives in gptc-infra (`OpenAiAssistantsClient`).

use std::future::Future;

use gptc_types::assistant::{Assistant, AssistantSettings, FileObject, Thread};
use gptc_types::error::ServiceError;
use gptc_types::message::{Message, MessageList};
use gptc_types::run::Run;

/// Remote calls the conversation driver depends on.
pub trait AssistantsClient: Send + Sync {
    fn create_assistant(
        &self,
        settings: &AssistantSettings,
    ) -> impl Future<Output = Result<Assistant, ServiceError>> + Send;

    fn create_thread(&self) -> impl Future<Output = Result<Thread, ServiceError>> + Send;

    /// Append a user message to a thread.
    fn create_message(
        &self,
        thread_id: &str,
        content: &str,
    ) -> impl Future<Output = Result<Message, ServiceError>> + Send;

    /// Start one inference pass of `assistant_id` over the thread.
    fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
    ) -> impl Future<Output = Result<Run, ServiceError>> + Send;

    fn retrieve_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> impl Future<Output = Result<Run, ServiceError>> + Send;

    /// Ask the service to stop a pending run.
    fn cancel_run(
        &self,
        thread_id: &str,
        run_id: &str,
    ) -> impl Future<Output = Result<Run, ServiceError>> + Send;

    /// List thread messages, newest first.
    fn list_messages(
        &self,
        thread_id: &str,
    ) -> impl Future<Output = Result<MessageList, ServiceError>> + Send;

    fn retrieve_message(
        &self,
        thread_id: &str,
        message_id: &str,
    ) -> impl Future<Output = Result<Message, ServiceError>> + Send;

    fn retrieve_file(
        &self,
        file_id: &str,
    ) -> impl Future<Output = Result<FileObject, ServiceError>> + Send;
}
