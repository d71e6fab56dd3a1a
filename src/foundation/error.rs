/// Convenience result type used across the crate.
pub type HushResult<T> = Result<T, HushError>;

/// Errors surfaced by configuration, asset loading and rendering.
///
/// Entity math never fails; only the host-facing edges return this type.
#[derive(thiserror::Error, Debug)]
pub enum HushError {
    /// Invalid configuration or caller input.
    #[error("validation error: {0}")]
    Validation(String),

    /// An asset (font or texture) could not be read or decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// The render surface rejected an operation.
    #[error("render error: {0}")]
    Render(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HushError {
    /// Build a [`HushError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HushError::Asset`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`HushError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
