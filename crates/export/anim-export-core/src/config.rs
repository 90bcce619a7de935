//! Export configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::Result;

/// Frame rate assumed for both source and target when none is given.
pub const DEFAULT_FPS: u32 = 25;

/// Which entries of an extracted keyframe set count as the root/armature and
/// are left out of the export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPolicy {
    /// Drop the first extracted bone whenever more than one bone is animated.
    #[default]
    FirstEntry,
    /// Drop every bone whose node has no parent or hangs directly off the
    /// scene's root node.
    TopLevel,
}

/// What an export does when no clip matches the requested name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingClipPolicy {
    /// Write a file holding only the header (`endTime 0;`).
    #[default]
    HeaderOnly,
    /// Fail with `ExportError::ClipNotFound` and leave the destination alone.
    Error,
}

/// Settings shared by single and bulk exports.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Frame rate the source keys were authored at.
    pub original_fps: u32,
    /// Frame rate of the written file.
    pub target_fps: u32,
    pub root_policy: RootPolicy,
    pub missing_clip: MissingClipPolicy,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            original_fps: DEFAULT_FPS,
            target_fps: DEFAULT_FPS,
            root_policy: RootPolicy::default(),
            missing_clip: MissingClipPolicy::default(),
        }
    }
}

impl ExportConfig {
    pub fn with_fps(mut self, original_fps: u32, target_fps: u32) -> Self {
        self.original_fps = original_fps;
        self.target_fps = target_fps;
        self
    }

    /// Both frame rates must be non-zero.
    pub fn validate(&self) -> Result<()> {
        for fps in [self.original_fps, self.target_fps] {
            if fps == 0 {
                return Err(ExportError::InvalidFrameRate { fps });
            }
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ExportError::Config {
            reason: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load settings from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Save settings as pretty-printed JSON, replacing the file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
