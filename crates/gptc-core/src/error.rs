use thiserror::Error;

use gptc_types::error::ServiceError;

/// Errors produced while driving a conversation turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("message {message_id} has content this client cannot render")]
    UnsupportedContent { message_id: String },
}

impl ChatError {
    /// Whether the session can go on with the next question after this error.
    ///
    /// Service errors end the process; content errors only end the turn.
    pub fn is_turn_local(&self) -> bool {
        matches!(self, ChatError::UnsupportedContent { .. })
    }
}
