/// Convenience result type used across Scrubline.
pub type ScrublineResult<T> = Result<T, ScrublineError>;

/// Top-level error taxonomy used by the timeline APIs.
///
/// The taxonomy is deliberately narrow: numeric faults (degenerate pin
/// geometry, out-of-range progress) are recovered locally by clamping and
/// never surface here. Errors are reserved for structurally invalid input.
#[derive(thiserror::Error, Debug)]
pub enum ScrublineError {
    /// Invalid user-provided scene or track data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while evaluating timeline state for a progress value.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing scene descriptions.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrublineError {
    /// Build a [`ScrublineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrublineError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ScrublineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
