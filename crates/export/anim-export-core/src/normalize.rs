//! Root dropping, frame range and frame-rate rescaling.

use log::debug;

use crate::config::RootPolicy;
use crate::data::{BoneKeyframes, ExportRange};
use crate::error::ExportError;
use crate::nodes::NodeTable;
use crate::Result;

/// Drop the first entry when more than one bone is present.
///
/// The first extracted bone is taken to be the armature. A lone entry is
/// kept.
pub fn drop_first_entry(bones: &mut Vec<BoneKeyframes>) {
    if bones.len() > 1 {
        let dropped = bones.remove(0);
        debug!("skipping root bone '{}'", dropped.bone);
    }
}

/// Drop every bone whose node is top-level in the hierarchy.
pub fn drop_top_level(bones: &mut Vec<BoneKeyframes>, nodes: &NodeTable) {
    bones.retain(|b| {
        let top = nodes.is_top_level(b.node);
        if top {
            debug!("skipping top-level bone '{}'", b.bone);
        }
        !top
    });
}

pub fn drop_roots(bones: &mut Vec<BoneKeyframes>, policy: RootPolicy, nodes: &NodeTable) {
    match policy {
        RootPolicy::FirstEntry => drop_first_entry(bones),
        RootPolicy::TopLevel => drop_top_level(bones, nodes),
    }
}

/// Start is always 0; end is the largest key time, or 0 with no keys.
pub fn frame_range(bones: &[BoneKeyframes]) -> ExportRange {
    let end_time = bones
        .iter()
        .flat_map(|b| b.keyframes.iter().map(|k| k.time))
        .max()
        .unwrap_or(0);
    ExportRange {
        start_time: 0,
        end_time,
    }
}

/// Rescale every key time by `original_fps / target_fps`, truncating toward
/// zero. Values are left alone. Applying this twice rescales twice.
pub fn rescale_times(
    bones: &mut [BoneKeyframes],
    original_fps: u32,
    target_fps: u32,
) -> Result<()> {
    check_fps(original_fps)?;
    check_fps(target_fps)?;
    if original_fps == target_fps {
        return Ok(());
    }
    let factor = f64::from(original_fps) / f64::from(target_fps);
    debug!("scaling keyframes by factor {factor}");
    for key in bones.iter_mut().flat_map(|b| b.keyframes.iter_mut()) {
        key.time = (key.time as f64 * factor) as i64;
    }
    Ok(())
}

/// Drop the root entry, compute the range, then rescale times.
///
/// The range is taken before rescaling, so `endTime` stays in source frames.
pub fn normalize(
    mut bones: Vec<BoneKeyframes>,
    original_fps: u32,
    target_fps: u32,
) -> Result<(ExportRange, Vec<BoneKeyframes>)> {
    drop_first_entry(&mut bones);
    let range = range_then_rescale(&mut bones, original_fps, target_fps)?;
    Ok((range, bones))
}

/// Like [`normalize`] with an explicit root policy.
pub fn normalize_with(
    mut bones: Vec<BoneKeyframes>,
    policy: RootPolicy,
    nodes: &NodeTable,
    original_fps: u32,
    target_fps: u32,
) -> Result<(ExportRange, Vec<BoneKeyframes>)> {
    drop_roots(&mut bones, policy, nodes);
    let range = range_then_rescale(&mut bones, original_fps, target_fps)?;
    Ok((range, bones))
}

fn range_then_rescale(
    bones: &mut [BoneKeyframes],
    original_fps: u32,
    target_fps: u32,
) -> Result<ExportRange> {
    let range = frame_range(bones);
    debug!(
        "frame range: start_time={}, end_time={}",
        range.start_time, range.end_time
    );
    rescale_times(bones, original_fps, target_fps)?;
    Ok(range)
}

fn check_fps(fps: u32) -> Result<()> {
    if fps == 0 {
        return Err(ExportError::InvalidFrameRate { fps });
    }
    Ok(())
}
