/// Convenience result type used across framegen.
pub type FramegenResult<T> = Result<T, FramegenError>;

/// Top-level error taxonomy used by loader and compositor APIs.
#[derive(thiserror::Error, Debug)]
pub enum FramegenError {
    /// Bytes could not be decoded as an image (including malformed base64).
    #[error("decode error: {0}")]
    Decode(String),

    /// A remote source was unreachable, answered non-2xx, or timed out.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Decoding succeeded but the pixel layout cannot be normalized.
    #[error("unsupported format error: {0}")]
    UnsupportedFormat(String),

    /// Any failure inside a compositor. `cause` keeps the underlying error, if any.
    #[error("composition error: {message}")]
    Composition {
        /// Stage and cause message.
        message: String,
        /// Underlying error that aborted the composition.
        #[source]
        cause: Option<Box<FramegenError>>,
    },

    /// Invalid caller-provided parameters or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramegenError {
    /// Build a [`FramegenError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FramegenError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build a [`FramegenError::UnsupportedFormat`] value.
    pub fn unsupported_format(msg: impl Into<String>) -> Self {
        Self::UnsupportedFormat(msg.into())
    }

    /// Build a [`FramegenError::Composition`] value without an underlying cause.
    pub fn composition(msg: impl Into<String>) -> Self {
        Self::Composition {
            message: msg.into(),
            cause: None,
        }
    }

    /// Build a [`FramegenError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Wrap `self` into a [`FramegenError::Composition`] tagged with `stage`.
    ///
    /// Composition errors pass through untouched so nested stages never double-wrap.
    pub fn in_stage(self, stage: &str) -> Self {
        match self {
            Self::Composition { .. } => self,
            other => Self::Composition {
                message: format!("{stage}: {other}"),
                cause: Some(Box::new(other)),
            },
        }
    }

    /// Innermost error in the composition cause chain.
    pub fn root_cause(&self) -> &FramegenError {
        match self {
            Self::Composition {
                cause: Some(inner), ..
            } => inner.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
