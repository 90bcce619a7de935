//! Snapshot of a scene's node registry.
//!
//! Taken once per export (or once per bulk export) so the writer and the
//! root policy can answer name and hierarchy queries without walking the
//! scene again for every clip.

use crate::ids::NodeId;
use crate::scene::Scene;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub name: String,
    pub parent: Option<NodeId>,
    pub child_count: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeTable {
    nodes: Vec<NodeInfo>,
    root: Option<NodeId>,
}

impl NodeTable {
    pub fn from_scene<S: Scene + ?Sized>(scene: &S) -> Self {
        let nodes = scene
            .nodes()
            .into_iter()
            .map(|id| NodeInfo {
                name: scene.node_name(id).unwrap_or_default().to_string(),
                parent: scene.node_parent(id),
                child_count: scene.child_count(id),
            })
            .collect();
        Self {
            nodes,
            root: scene.root_node(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&NodeInfo> {
        self.nodes.get(node.index())
    }

    /// First node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(|i| NodeId(i as u32))
    }

    /// Direct child count of the first node named `name`.
    pub fn child_count_of(&self, name: &str) -> Option<usize> {
        self.find_by_name(name)
            .and_then(|id| self.get(id))
            .map(|n| n.child_count)
    }

    /// True when the node has no parent or its parent is the scene root.
    pub fn is_top_level(&self, node: NodeId) -> bool {
        match self.get(node).and_then(|n| n.parent) {
            None => true,
            Some(parent) => Some(parent) == self.root,
        }
    }
}
