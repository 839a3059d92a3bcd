/// Convenience result type used across lightrays.
pub type RaysResult<T> = Result<T, RaysError>;

/// Top-level error taxonomy used by the effect's internals.
///
/// The [`crate::LightRays`] component never hands these to its host: it turns them into state
/// transitions and `tracing` events at its boundary.
#[derive(thiserror::Error, Debug)]
pub enum RaysError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawing context could not be obtained, or was lost while in use.
    #[error("context error: {0}")]
    Context(String),

    /// The ray program was rejected (compile/link) or a uniform upload did not match it.
    #[error("shader error: {0}")]
    Shader(String),

    /// Errors while drawing or reading back a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RaysError {
    /// Build a [`RaysError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RaysError::Context`] value.
    pub fn context(msg: impl Into<String>) -> Self {
        Self::Context(msg.into())
    }

    /// Build a [`RaysError::Shader`] value.
    pub fn shader(msg: impl Into<String>) -> Self {
        Self::Shader(msg.into())
    }

    /// Build a [`RaysError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`RaysError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
