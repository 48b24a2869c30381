//! Error types for artifact loading and prediction

use axum::http::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the artifact store and the prediction service
#[derive(Error, Debug)]
pub enum SegmentError {
    /// A persisted artifact could not be read or does not match the expected shape.
    /// Fatal at startup.
    #[error("failed to load artifact {}: {reason}", .path.display())]
    ArtifactLoad { path: PathBuf, reason: String },

    /// User-supplied features were malformed or negative
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Loaded artifacts disagree with the input dimensionality
    #[error("model shape mismatch: expected {expected} features, got {actual}")]
    ModelShape { expected: usize, actual: usize },
}

impl SegmentError {
    pub(crate) fn artifact_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ArtifactLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status used when the error is rendered by the web front end
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ArtifactLoad { .. } | Self::ModelShape { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Whether the user can fix this by changing their input
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}
