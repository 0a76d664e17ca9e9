/// Convenience result type used across the crate.
pub type OverlayResult<T> = Result<T, OverlayError>;

/// Top-level error taxonomy used by overlay APIs.
#[derive(thiserror::Error, Debug)]
pub enum OverlayError {
    /// A fixture document has the wrong overall shape.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid sequencer, viewport or boundary parameters.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Unexpected failure while presenting an already-validated record.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OverlayError {
    /// Build an [`OverlayError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`OverlayError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build an [`OverlayError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`OverlayError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for OverlayError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

impl From<crate::hotspot::RecordError> for OverlayError {
    fn from(e: crate::hotspot::RecordError) -> Self {
        Self::validation(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
