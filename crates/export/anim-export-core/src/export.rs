//! Export entry points: one clip to one file, or every listed clip to a
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::anim_file::write_anim_file;
use crate::config::{ExportConfig, MissingClipPolicy};
use crate::data::ExportRange;
use crate::error::ExportError;
use crate::extract::extract;
use crate::loader::LoadedScene;
use crate::nodes::NodeTable;
use crate::normalize::normalize_with;
use crate::scene::Scene;
use crate::Result;

/// What a single export wrote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSummary {
    pub clip: String,
    pub path: PathBuf,
    /// False when no clip matched and a header-only file was written.
    pub found: bool,
    pub range: ExportRange,
    pub bones: usize,
    pub curves: usize,
}

/// Export the clip named `clip_name` to `dest`.
pub fn export_single_animation<S: Scene>(
    clip_name: &str,
    dest: &Path,
    loaded: &LoadedScene<S>,
    cfg: &ExportConfig,
) -> Result<ExportSummary> {
    cfg.validate()?;
    let nodes = NodeTable::from_scene(&loaded.scene);
    export_with_nodes(clip_name, dest, loaded, &nodes, cfg)
}

/// Export every clip in `clip_names` into `dir` as `<name>.anim`.
///
/// `dir` is created when missing. Clips are written one after another; the
/// first failure stops the run and is returned.
pub fn export_all_animations<S, N>(
    clip_names: &[N],
    dir: &Path,
    loaded: &LoadedScene<S>,
    cfg: &ExportConfig,
) -> Result<Vec<ExportSummary>>
where
    S: Scene,
    N: AsRef<str>,
{
    cfg.validate()?;
    fs::create_dir_all(dir)?;
    let nodes = NodeTable::from_scene(&loaded.scene);

    let mut summaries = Vec::with_capacity(clip_names.len());
    for name in clip_names {
        let name = name.as_ref();
        let dest = dir.join(format!("{name}.anim"));
        info!("starting export for clip '{name}'");
        summaries.push(export_with_nodes(name, &dest, loaded, &nodes, cfg)?);
    }
    info!("exported {} clip(s) to {}", summaries.len(), dir.display());
    Ok(summaries)
}

fn export_with_nodes<S: Scene>(
    clip_name: &str,
    dest: &Path,
    loaded: &LoadedScene<S>,
    nodes: &NodeTable,
    cfg: &ExportConfig,
) -> Result<ExportSummary> {
    info!("exporting clip '{clip_name}' to {}", dest.display());

    let clip = loaded.find_clip(clip_name);
    let extracted = match clip {
        Some(clip) => extract(&loaded.scene, clip.stack),
        None => match cfg.missing_clip {
            MissingClipPolicy::Error => {
                return Err(ExportError::ClipNotFound {
                    name: clip_name.to_string(),
                })
            }
            MissingClipPolicy::HeaderOnly => {
                warn!("no clip named '{clip_name}'; writing header only");
                Vec::new()
            }
        },
    };

    let (range, bones) = normalize_with(
        extracted,
        cfg.root_policy,
        nodes,
        cfg.original_fps,
        cfg.target_fps,
    )?;
    let curves = write_anim_file(dest, &bones, range, nodes)?;
    info!(
        "clip '{clip_name}' exported: {} bone(s), {curves} curve(s)",
        bones.len()
    );

    Ok(ExportSummary {
        clip: clip_name.to_string(),
        path: dest.to_path_buf(),
        found: clip.is_some(),
        range,
        bones: bones.len(),
        curves,
    })
}
