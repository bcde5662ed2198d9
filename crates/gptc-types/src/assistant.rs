//! Assistant, thread and file handles returned by the Assistants service.
//!
//! These are the remote-owned entities the client only holds by id. Fields
//! the client never reads are left out; serde ignores them on decode.

use serde::{Deserialize, Serialize};

/// A remote assistant persona: name, instructions and model.
///
/// Created once per process run and reused for every turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

/// Body of a create-assistant request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantSettings {
    pub name: String,
    pub instructions: String,
    pub model: String,
}

/// A remote conversation container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
}

/// An uploaded file referenced by a citation or file-path annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileObject {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub purpose: Option<String>,
}
