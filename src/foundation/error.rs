use crate::content::bridges::BridgeErrors;

/// Convenience result type used across scrolltide.
pub type ScrolltideResult<T> = Result<T, ScrolltideError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ScrolltideError {
    /// Structurally invalid content (dangling frame references, duplicate ids, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Degenerate or inconsistent timing configuration (zero total duration, bad constants).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Bridged text blocks disagree on content, anchor position or reciprocity.
    #[error("content integrity error: {0}")]
    Integrity(BridgeErrors),

    /// Errors while constructing or seeking a schedule.
    #[error("schedule error: {0}")]
    Schedule(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrolltideError {
    /// Build a [`ScrolltideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrolltideError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`ScrolltideError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`ScrolltideError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
