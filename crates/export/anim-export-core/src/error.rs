//! Error types for scene loading and `.anim` export

use serde::{Deserialize, Serialize};

/// Error type for every fallible operation in the export pipeline
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ExportError {
    /// The importer could not be initialized on the given file
    #[error("Failed to initialize scene importer for file: {path} ({reason})")]
    SceneInitialize { path: String, reason: String },

    /// The importer was initialized but could not import the scene
    #[error("Failed to import scene file: {path} ({reason})")]
    SceneImport { path: String, reason: String },

    /// No clip with the requested display name
    #[error("Clip not found: {name}")]
    ClipNotFound { name: String },

    /// A bone named in the keyframe set has no node in the scene
    #[error("Bone not found in scene: {bone}")]
    BoneNotFound { bone: String },

    /// Frame rates must be non-zero
    #[error("Invalid frame rate: {fps}")]
    InvalidFrameRate { fps: u32 },

    /// IO error
    #[error("IO error: {reason}")]
    Io { reason: String },

    /// Serialization error
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {reason}")]
    Config { reason: String },
}

impl ExportError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::SceneInitialize { .. } | Self::SceneImport { .. } => "load",
            Self::ClipNotFound { .. } | Self::BoneNotFound { .. } => "data",
            Self::InvalidFrameRate { .. } | Self::Config { .. } => "validation",
            Self::Io { .. } => "io",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
