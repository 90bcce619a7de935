//! Scene-import capability.
//!
//! The export pipeline only needs a narrow view of an imported scene: its
//! animation stacks, the first layer of each stack, the node registry and the
//! per-channel curves of a node on a layer. Importers for concrete file
//! formats implement [`SceneImporter`] and hand back a [`Scene`].

pub mod json;
pub mod memory;

use std::path::Path;

use crate::data::Channel;
use crate::ids::{LayerId, NodeId, StackId};

pub use json::JsonSceneImporter;
pub use memory::{MemoryCurve, MemoryScene};

/// Keyframe accessors of a single animation curve.
pub trait AnimCurve {
    fn key_count(&self) -> usize;
    /// Key time as a frame number.
    fn key_time(&self, index: usize) -> i64;
    fn key_value(&self, index: usize) -> f64;
}

/// Read access to an imported scene.
pub trait Scene {
    type Curve: AnimCurve;

    /// Number of animation stacks, in importer order.
    fn stack_count(&self) -> usize;
    fn stack_name(&self, stack: StackId) -> Option<&str>;
    /// First animation layer of a stack, if it has any.
    fn first_layer(&self, stack: StackId) -> Option<LayerId>;
    fn layer_name(&self, layer: LayerId) -> Option<&str>;

    /// Number of nodes in the scene's node registry.
    fn node_count(&self) -> usize;
    fn node_name(&self, node: NodeId) -> Option<&str>;
    fn node_parent(&self, node: NodeId) -> Option<NodeId>;
    fn child_count(&self, node: NodeId) -> usize;
    /// The scene's own root node, when the format has one.
    fn root_node(&self) -> Option<NodeId>;

    /// Curve on `(node, layer, channel)`, if that channel is animated.
    fn curve(&self, node: NodeId, layer: LayerId, channel: Channel) -> Option<&Self::Curve>;

    /// Stack ids in registry order.
    fn stacks(&self) -> Vec<StackId> {
        (0..self.stack_count() as u32).map(StackId).collect()
    }

    /// Node ids in registry order.
    fn nodes(&self) -> Vec<NodeId> {
        (0..self.node_count() as u32).map(NodeId).collect()
    }

    /// First node in registry order with the given name.
    fn find_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes()
            .into_iter()
            .find(|n| self.node_name(*n) == Some(name))
    }
}

/// Two-phase importer: `initialize` binds a file, `import` builds the scene.
///
/// The phases fail separately so callers can tell an unreadable file from a
/// file that was read but is not a valid scene.
pub trait SceneImporter {
    type Scene: Scene;

    fn initialize(&mut self, path: &Path) -> Result<(), String>;
    fn import(&mut self) -> Result<Self::Scene, String>;
}
