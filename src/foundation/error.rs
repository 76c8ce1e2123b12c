/// Convenience result type used across facepop.
pub type FaceResult<T> = Result<T, FaceError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Runtime conditions such as closing an unknown popup, clearing an empty stage or a
/// superseded spawn are not errors; they are silent no-ops inside the controller.
#[derive(thiserror::Error, Debug)]
pub enum FaceError {
    /// Invalid user-provided configuration or zone data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The capture collaborator could not deliver a raster.
    #[error("decode error: {0}")]
    Decode(String),

    /// Raster buffers with mismatched or overflowing dimensions.
    #[error("raster error: {0}")]
    Raster(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FaceError {
    /// Build a [`FaceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FaceError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`FaceError::Raster`] value.
    pub fn raster(msg: impl Into<String>) -> Self {
        Self::Raster(msg.into())
    }

    /// Build a [`FaceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for FaceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
