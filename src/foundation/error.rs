/// Convenience result type used across drape.
pub type DrapeResult<T> = Result<T, DrapeError>;

/// Top-level error taxonomy used by layer, compositing and session APIs.
#[derive(thiserror::Error, Debug)]
pub enum DrapeError {
    /// Invalid user-provided data (unknown layer, bad color, bad config).
    #[error("validation error: {0}")]
    Validation(String),

    /// An uploaded or captured image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The external segmentation service failed or returned an unusable mask.
    #[error("segmentation error: {0}")]
    Segmentation(String),

    /// Camera access failed or no stream is active.
    #[error("camera error: {0}")]
    Camera(String),

    /// A processing step is already pending for this layer.
    #[error("busy: {0}")]
    Busy(String),

    /// Errors while laying out or rasterizing layers.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DrapeError {
    /// Build a [`DrapeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`DrapeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`DrapeError::Segmentation`] value.
    pub fn segmentation(msg: impl Into<String>) -> Self {
        Self::Segmentation(msg.into())
    }

    /// Build a [`DrapeError::Camera`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera(msg.into())
    }

    /// Build a [`DrapeError::Busy`] value.
    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }

    /// Build a [`DrapeError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DrapeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for DrapeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
