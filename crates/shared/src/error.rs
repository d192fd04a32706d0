use thiserror::Error;

/// The one failure kind the fetch path surfaces. Connection failures,
/// non-success HTTP statuses and JSON decode failures all collapse into
/// it; the message keeps the underlying cause for logs.
#[derive(Debug, Clone, Error)]
#[error("character fetch failed: {message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
