use thiserror::Error;

/// Failure taxonomy for one API interaction. Every variant is local to the tick
/// that produced it; none is fatal to the client.
#[derive(Error, Debug)]
pub enum QbotError {
    /// The HTTP call did not complete at all (network failure, no response).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived but its body failed schema validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Non-200 status with a parseable platform error body.
    #[error("Api error ({code}): {description}")]
    Api { code: i64, description: String },

    #[error("Config error: {0}")]
    Config(String),

    /// Failure inside an application update handler; isolated by the registry.
    #[error("Handler error: {0}")]
    Handler(String),
}

impl QbotError {
    /// True for failures where the request may succeed if repeated; used by the
    /// dispatcher's retry policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QbotError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, QbotError>;
