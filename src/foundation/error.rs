/// Convenience result type used across promptreel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy.
///
/// Scene generation and single-frame rendering are total and never produce these; only surface
/// construction, animation configuration, sessions and sinks do.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided animation parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The caller did not provide a drawable render target.
    #[error("surface error: {0}")]
    Surface(String),

    /// Frames could not be captured or encoded by a sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration or blueprints.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Catch-all wrapper for contextual errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`ReelError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build [`ReelError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
