/// Convenience result type used across mitamorph.
pub type MorphResult<T> = Result<T, MorphError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    /// Invalid district table, step, or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while scheduling or sampling interpolations.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while evaluating the scene for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors while exporting or rasterizing the scene.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The scene controller was torn down and may no longer be driven.
    #[error("scene has been disposed")]
    Disposed,

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    /// Build a [`MorphError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MorphError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MorphError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`MorphError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

impl From<serde_json::Error> for MorphError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
