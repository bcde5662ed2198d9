//! OpenTelemetry GenAI Semantic Convention attribute values.
//!
//! Field names are written inline in `info_span!` (e.g.
//! `gen_ai.operation.name = OP_CREATE_RUN`); this module holds the values so
//! every call site agrees on spelling.
//!
//! Span naming convention: all remote calls use `"gen_ai.assistants"`.

// --- Provider name values ---

/// OpenAI provider identifier (`gen_ai.system`).
pub const PROVIDER_OPENAI: &str = "openai";

// --- Operation name values (`gen_ai.operation.name`) ---

pub const OP_CREATE_ASSISTANT: &str = "create_assistant";

pub const OP_CREATE_THREAD: &str = "create_thread";

/// Append a user message to the thread.
pub const OP_CREATE_MESSAGE: &str = "create_message";

/// Start an inference pass.
pub const OP_CREATE_RUN: &str = "create_run";

/// Status check while a run is pending.
pub const OP_RETRIEVE_RUN: &str = "retrieve_run";

pub const OP_CANCEL_RUN: &str = "cancel_run";

pub const OP_LIST_MESSAGES: &str = "list_messages";

pub const OP_RETRIEVE_MESSAGE: &str = "retrieve_message";

/// Filename lookup for a citation.
pub const OP_RETRIEVE_FILE: &str = "retrieve_file";
