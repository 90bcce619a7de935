//! Writer for the flat `.anim` curve text format.
//!
//! Layout: seven header lines, then one `anim` block per animated channel of
//! every bone, in translate/rotate/scale × X/Y/Z order. Tangent metadata is
//! fixed: the first key of a block is written `fixed fixed`, every later key
//! `linear linear`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::trace;

use crate::data::{BoneKeyframes, Channel, ExportRange};
use crate::error::ExportError;
use crate::nodes::NodeTable;
use crate::Result;

pub const ANIM_VERSION: &str = "1.1";
pub const MAYA_VERSION: &str = "2025";
/// `pal` is the 25 frames/sec time unit.
pub const TIME_UNIT: &str = "pal";
pub const LINEAR_UNIT: &str = "cm";
pub const ANGULAR_UNIT: &str = "deg";

/// Number of header lines preceding the first `anim` block.
pub const HEADER_LINES: usize = 7;

/// Format a key value; integral values carry no decimal point.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        // folds -0 into 0
        format!("{}", value + 0.0)
    } else {
        format!("{value}")
    }
}

pub fn write_header<W: Write>(out: &mut W, range: ExportRange) -> std::io::Result<()> {
    writeln!(out, "animVersion {ANIM_VERSION};")?;
    writeln!(out, "mayaVersion {MAYA_VERSION};")?;
    writeln!(out, "timeUnit {TIME_UNIT};")?;
    writeln!(out, "linearUnit {LINEAR_UNIT};")?;
    writeln!(out, "angularUnit {ANGULAR_UNIT};")?;
    writeln!(out, "startTime {};", range.start_time)?;
    writeln!(out, "endTime {};", range.end_time)?;
    Ok(())
}

fn write_curve<W: Write>(
    out: &mut W,
    bone: &BoneKeyframes,
    channel: Channel,
    child_count: usize,
) -> std::io::Result<()> {
    let kind = channel.kind().as_str();
    writeln!(
        out,
        "anim {kind}.{channel} {channel} {} 0 {child_count} {};",
        bone.bone,
        channel.key_index()
    )?;
    out.write_all(
        b"animData {\n  input time;\n  output linear;\n  weighted 0;\n  preInfinity constant;\n  postInfinity constant;\n  keys {\n",
    )?;
    for (i, key) in bone.channel_keys(channel).enumerate() {
        let value = format_value(key.value);
        if i == 0 {
            writeln!(out, "    {} {value} fixed fixed 1 0 0 0 1 0 1;", key.time)?;
        } else {
            writeln!(out, "    {} {value} linear linear 1 0 0;", key.time)?;
        }
    }
    out.write_all(b"  }\n}\n")?;
    Ok(())
}

/// Write a complete `.anim` document. Returns the number of curve blocks.
///
/// Child counts come from `nodes`, looked up by bone name; a bone missing
/// from the table fails with `BoneNotFound` after the preceding output has
/// been written.
pub fn write_anim<W: Write>(
    out: &mut W,
    bones: &[BoneKeyframes],
    range: ExportRange,
    nodes: &NodeTable,
) -> Result<usize> {
    write_header(out, range)?;
    let mut curves = 0;
    for bone in bones {
        let channels = bone.animated_channels();
        if channels.is_empty() {
            continue;
        }
        let child_count = nodes
            .child_count_of(&bone.bone)
            .ok_or_else(|| ExportError::BoneNotFound {
                bone: bone.bone.clone(),
            })?;
        for channel in channels {
            trace!("writing {}.{channel}", bone.bone);
            write_curve(out, bone, channel, child_count)?;
            curves += 1;
        }
    }
    Ok(curves)
}

/// Create (or truncate) `path` and write the document through a buffer.
///
/// A failure part way leaves whatever was already written in place.
pub fn write_anim_file(
    path: &Path,
    bones: &[BoneKeyframes],
    range: ExportRange,
    nodes: &NodeTable,
) -> Result<usize> {
    let mut out = BufWriter::new(File::create(path)?);
    let curves = write_anim(&mut out, bones, range, nodes)?;
    out.flush()?;
    Ok(curves)
}
