//! Per-bone keyframe extraction from an animation stack.

use log::{debug, trace};

use crate::data::{BoneKeyframes, Channel, Keyframe};
use crate::ids::{LayerId, NodeId, StackId};
use crate::loader::LoadedScene;
use crate::scene::{AnimCurve, Scene};

/// Extract keyframes of every animated node for `stack`.
///
/// Only the stack's first layer is read. Nodes are visited in registry
/// order; a node without a curve on any of the nine transform channels is
/// left out. Returns an empty set when the stack has no layer.
pub fn extract<S: Scene>(scene: &S, stack: StackId) -> Vec<BoneKeyframes> {
    let stack_name = scene.stack_name(stack).unwrap_or_default();
    let Some(layer) = scene.first_layer(stack) else {
        debug!("no animation layers found in stack '{stack_name}'");
        return Vec::new();
    };
    debug!(
        "using stack '{stack_name}', layer '{}'",
        scene.layer_name(layer).unwrap_or_default()
    );

    let mut bones = Vec::new();
    for node in scene.nodes() {
        let name = scene.node_name(node).unwrap_or_default();
        let keyframes = node_keyframes(scene, node, layer);
        if keyframes.is_empty() {
            trace!("no keyframes for bone '{name}'");
            continue;
        }
        debug!("{} keyframe(s) for bone '{name}'", keyframes.len());
        bones.push(BoneKeyframes {
            bone: name.to_string(),
            node,
            keyframes,
        });
    }
    bones
}

/// Extract by clip display name; an unknown name yields an empty set.
pub fn extract_named<S: Scene>(loaded: &LoadedScene<S>, clip_name: &str) -> Vec<BoneKeyframes> {
    match loaded.find_clip(clip_name) {
        Some(clip) => extract(&loaded.scene, clip.stack),
        None => {
            debug!("no clip named '{clip_name}'");
            Vec::new()
        }
    }
}

/// All keys of one node on one layer, channel by channel in export order.
fn node_keyframes<S: Scene>(scene: &S, node: NodeId, layer: LayerId) -> Vec<Keyframe> {
    let mut keyframes = Vec::new();
    for channel in Channel::ALL {
        let Some(curve) = scene.curve(node, layer, channel) else {
            continue;
        };
        trace!("{channel}: {} key(s)", curve.key_count());
        keyframes.extend(
            (0..curve.key_count())
                .map(|i| Keyframe::linear(channel, curve.key_time(i), curve.key_value(i))),
        );
    }
    keyframes
}
