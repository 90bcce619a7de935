//! anim-export-core
//!
//! Reads animation clips from an imported scene and writes each clip's bone
//! transform keyframes as a flat `.anim` curve file.
//!
//! Pipeline, once per exported clip:
//! [`load`] → [`extract`](extract::extract) → [`normalize`](normalize::normalize)
//! → [`write_anim`](anim_file::write_anim).
//! [`export_single_animation`] and [`export_all_animations`] drive it end to end.

pub mod anim_file;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod extract;
pub mod ids;
pub mod loader;
pub mod nodes;
pub mod normalize;
pub mod scene;

pub use anim_file::{write_anim, write_anim_file};
pub use config::{ExportConfig, MissingClipPolicy, RootPolicy, DEFAULT_FPS};
pub use data::{
    clean_clip_name, AnimationClip, Axis, BoneKeyframes, Channel, ExportRange, Interpolation,
    Keyframe, TransformKind,
};
pub use error::ExportError;
pub use export::{export_all_animations, export_single_animation, ExportSummary};
pub use extract::{extract, extract_named};
pub use ids::{LayerId, NodeId, StackId};
pub use loader::{load, LoadedScene};
pub use nodes::NodeTable;
pub use normalize::normalize;
pub use scene::{AnimCurve, JsonSceneImporter, MemoryScene, Scene, SceneImporter};

/// Result type for the export pipeline
pub type Result<T> = core::result::Result<T, ExportError>;
