use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the scene core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Path construction rejected: not enough points, or no usable arc-length table
    #[error("path needs at least {required} usable control points, got {found}")]
    InsufficientControlPoints { found: usize, required: usize },

    /// The tracked object has not been loaded into the scene yet
    #[error("tracked object is not in the scene yet")]
    TargetNotReady,

    /// The asset loader gave up on a model
    #[error("failed to load asset {path:?}: {message}")]
    AssetLoadFailure { path: PathBuf, message: String },
}

impl SceneError {
    /// Per-frame errors are swallowed by the frame loop; everything else halts setup
    pub fn is_recoverable(&self) -> bool {
        matches!(self, SceneError::TargetNotReady | SceneError::AssetLoadFailure { .. })
    }
}

pub type SceneResult<T> = Result<T, SceneError>;
