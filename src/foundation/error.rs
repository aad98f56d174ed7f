/// Convenience result type used across tabletop.
pub type TabletopResult<T> = Result<T, TabletopError>;

/// Top-level error taxonomy used by the compositing pipeline.
#[derive(thiserror::Error, Debug)]
pub enum TabletopError {
    /// Invalid run parameters or unreadable inputs.
    #[error("config error: {0}")]
    Config(String),

    /// Two images that must share a resolution do not.
    #[error(
        "dimension mismatch: expected {}x{}, got {}x{}",
        expected.0,
        expected.1,
        actual.0,
        actual.1
    )]
    Dimension {
        /// `(width, height)` the operation required.
        expected: (u32, u32),
        /// `(width, height)` that was supplied.
        actual: (u32, u32),
    },

    /// Rendering context or shading failures, with backend diagnostics.
    #[error("backend error: {0}")]
    Backend(String),

    /// Image decode or encode failures.
    #[error("codec error: {0}")]
    Codec(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TabletopError {
    /// Build a [`TabletopError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`TabletopError::Backend`] value.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Build a [`TabletopError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }

    /// Build a [`TabletopError::Dimension`] value from `(width, height)` pairs.
    pub fn dimension(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::Dimension { expected, actual }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
