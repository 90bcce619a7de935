//! Clip, channel and keyframe data model shared by the export pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ids::{NodeId, StackId};

/// Transform property animated by a channel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    Translate,
    Rotate,
    Scale,
}

impl TransformKind {
    pub const ALL: [TransformKind; 3] = [Self::Translate, Self::Rotate, Self::Scale];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Rotate => "rotate",
            Self::Scale => "scale",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Self::X, Self::Y, Self::Z];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }
}

/// One scalar animated property of a node, e.g. `rotateY`.
///
/// Serialized with the curve attribute name used in `.anim` files
/// (`translateX` .. `scaleZ`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Channel {
    TranslateX,
    TranslateY,
    TranslateZ,
    RotateX,
    RotateY,
    RotateZ,
    ScaleX,
    ScaleY,
    ScaleZ,
}

impl Channel {
    /// All channels in export order: translate, rotate, scale, each X, Y, Z.
    pub const ALL: [Channel; 9] = [
        Self::TranslateX,
        Self::TranslateY,
        Self::TranslateZ,
        Self::RotateX,
        Self::RotateY,
        Self::RotateZ,
        Self::ScaleX,
        Self::ScaleY,
        Self::ScaleZ,
    ];

    pub fn new(kind: TransformKind, axis: Axis) -> Self {
        match (kind, axis) {
            (TransformKind::Translate, Axis::X) => Self::TranslateX,
            (TransformKind::Translate, Axis::Y) => Self::TranslateY,
            (TransformKind::Translate, Axis::Z) => Self::TranslateZ,
            (TransformKind::Rotate, Axis::X) => Self::RotateX,
            (TransformKind::Rotate, Axis::Y) => Self::RotateY,
            (TransformKind::Rotate, Axis::Z) => Self::RotateZ,
            (TransformKind::Scale, Axis::X) => Self::ScaleX,
            (TransformKind::Scale, Axis::Y) => Self::ScaleY,
            (TransformKind::Scale, Axis::Z) => Self::ScaleZ,
        }
    }

    pub fn kind(self) -> TransformKind {
        match self {
            Self::TranslateX | Self::TranslateY | Self::TranslateZ => TransformKind::Translate,
            Self::RotateX | Self::RotateY | Self::RotateZ => TransformKind::Rotate,
            Self::ScaleX | Self::ScaleY | Self::ScaleZ => TransformKind::Scale,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Self::TranslateX | Self::RotateX | Self::ScaleX => Axis::X,
            Self::TranslateY | Self::RotateY | Self::ScaleY => Axis::Y,
            Self::TranslateZ | Self::RotateZ | Self::ScaleZ => Axis::Z,
        }
    }

    /// Curve attribute name, e.g. `rotateX`.
    pub fn name(self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::TranslateZ => "translateZ",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::RotateZ => "rotateZ",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::ScaleZ => "scaleZ",
        }
    }

    /// Key index written at the end of an `anim` line:
    /// translate 0..2, rotate 3..5, scale 6..8.
    pub fn key_index(self) -> u8 {
        let group = match self.kind() {
            TransformKind::Translate => 0,
            TransformKind::Rotate => 3,
            TransformKind::Scale => 6,
        };
        let axis = match self.axis() {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        };
        group + axis
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown channel '{s}'"))
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    #[default]
    Linear,
}

/// A (time, value) sample on one channel, with tangent metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub channel: Channel,
    /// Frame number. Rescaled in place by the normalizer.
    pub time: i64,
    pub value: f64,
    pub interp_in: Interpolation,
    pub interp_out: Interpolation,
    pub weight_in: f64,
    pub weight_out: f64,
    pub tangent_in: f64,
    pub tangent_out: f64,
}

impl Keyframe {
    /// Keyframe with linear interpolation, unit weights and flat tangents.
    pub fn linear(channel: Channel, time: i64, value: f64) -> Self {
        Self {
            channel,
            time,
            value,
            interp_in: Interpolation::Linear,
            interp_out: Interpolation::Linear,
            weight_in: 1.0,
            weight_out: 1.0,
            tangent_in: 0.0,
            tangent_out: 0.0,
        }
    }
}

/// Keyframes extracted for one animated node.
///
/// Keys are grouped by channel in export order; within a channel they keep
/// the curve's order and are never re-sorted or de-duplicated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneKeyframes {
    pub bone: String,
    pub node: NodeId,
    pub keyframes: Vec<Keyframe>,
}

impl BoneKeyframes {
    pub fn new(bone: impl Into<String>, node: NodeId) -> Self {
        Self {
            bone: bone.into(),
            node,
            keyframes: Vec::new(),
        }
    }

    /// Keys of a single channel in stored order.
    pub fn channel_keys(&self, channel: Channel) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.iter().filter(move |k| k.channel == channel)
    }

    pub fn has_channel(&self, channel: Channel) -> bool {
        self.keyframes.iter().any(|k| k.channel == channel)
    }

    /// Channels with at least one key, in export order.
    pub fn animated_channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| self.has_channel(*c))
            .collect()
    }
}

/// Frame range written to the `.anim` header.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExportRange {
    pub start_time: i64,
    pub end_time: i64,
}

/// One animation stack as presented to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub stack: StackId,
    pub original_name: String,
    pub display_name: String,
}

impl AnimationClip {
    pub fn new(stack: StackId, original_name: impl Into<String>) -> Self {
        let original_name = original_name.into();
        let display_name = clean_clip_name(&original_name).to_string();
        Self {
            stack,
            original_name,
            display_name,
        }
    }
}

/// Strip everything up to and including the first `|` (the namespace prefix
/// exporters put in front of take names, e.g. `Armature|Walk`).
pub fn clean_clip_name(name: &str) -> &str {
    match name.split_once('|') {
        Some((_, rest)) => rest,
        None => name,
    }
}
