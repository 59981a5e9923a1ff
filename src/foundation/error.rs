/// Convenience result type used across the crate.
pub type DriftResult<T> = Result<T, DriftError>;

/// Crate error type.
///
/// Render-path failures never reach the host: the effect and driver layers turn them into an
/// empty particle set or an inert animator and log them. Configuration loading and the CLI
/// surface them normally.
#[derive(thiserror::Error, Debug)]
pub enum DriftError {
    /// Invalid configuration value or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Surface creation or rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Font loading or text shaping failure.
    #[error("font error: {0}")]
    Font(String),

    /// Config (de)serialization failure.
    #[error("config error: {0}")]
    Config(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DriftError {
    /// Build a [`DriftError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DriftError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DriftError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`DriftError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
