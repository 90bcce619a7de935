//! In-memory scene built through a small builder API.

use std::collections::HashMap;

use crate::data::Channel;
use crate::ids::{LayerId, NodeId, StackId};
use crate::scene::{AnimCurve, Scene};

/// Curve stored as `(frame, value)` pairs in key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryCurve {
    keys: Vec<(i64, f64)>,
}

impl MemoryCurve {
    pub fn new(keys: Vec<(i64, f64)>) -> Self {
        Self { keys }
    }
}

impl AnimCurve for MemoryCurve {
    fn key_count(&self) -> usize {
        self.keys.len()
    }

    fn key_time(&self, index: usize) -> i64 {
        self.keys.get(index).map_or(0, |k| k.0)
    }

    fn key_value(&self, index: usize) -> f64 {
        self.keys.get(index).map_or(0.0, |k| k.1)
    }
}

#[derive(Clone, Debug)]
struct StackEntry {
    name: String,
    layers: Vec<LayerId>,
}

#[derive(Clone, Debug)]
struct NodeEntry {
    name: String,
    parent: Option<NodeId>,
    children: usize,
}

/// Scene held entirely in memory.
///
/// Registry order is insertion order for stacks, layers and nodes.
#[derive(Debug, Default)]
pub struct MemoryScene {
    stacks: Vec<StackEntry>,
    layers: Vec<String>,
    nodes: Vec<NodeEntry>,
    root: Option<NodeId>,
    curves: HashMap<(NodeId, LayerId, Channel), MemoryCurve>,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node; `parent` gains one child.
    pub fn add_node(&mut self, name: impl Into<String>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if let Some(p) = parent.and_then(|p| self.nodes.get_mut(p.index())) {
            p.children += 1;
        }
        self.nodes.push(NodeEntry {
            name: name.into(),
            parent,
            children: 0,
        });
        id
    }

    /// Mark a node as the scene's own root.
    pub fn set_root(&mut self, node: NodeId) {
        self.root = Some(node);
    }

    pub fn add_stack(&mut self, name: impl Into<String>) -> StackId {
        let id = StackId(self.stacks.len() as u32);
        self.stacks.push(StackEntry {
            name: name.into(),
            layers: Vec::new(),
        });
        id
    }

    /// Append a layer to `stack`. A layer added to an unknown stack is
    /// registered but belongs to no stack.
    pub fn add_layer(&mut self, stack: StackId, name: impl Into<String>) -> LayerId {
        let id = LayerId(self.layers.len() as u32);
        self.layers.push(name.into());
        if let Some(entry) = self.stacks.get_mut(stack.index()) {
            entry.layers.push(id);
        }
        id
    }

    /// Replace the curve on `(node, layer, channel)`.
    pub fn set_curve<I>(&mut self, node: NodeId, layer: LayerId, channel: Channel, keys: I)
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        self.curves.insert(
            (node, layer, channel),
            MemoryCurve::new(keys.into_iter().collect()),
        );
    }
}

impl Scene for MemoryScene {
    type Curve = MemoryCurve;

    fn stack_count(&self) -> usize {
        self.stacks.len()
    }

    fn stack_name(&self, stack: StackId) -> Option<&str> {
        self.stacks.get(stack.index()).map(|s| s.name.as_str())
    }

    fn first_layer(&self, stack: StackId) -> Option<LayerId> {
        self.stacks
            .get(stack.index())
            .and_then(|s| s.layers.first().copied())
    }

    fn layer_name(&self, layer: LayerId) -> Option<&str> {
        self.layers.get(layer.index()).map(String::as_str)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.index()).map(|n| n.name.as_str())
    }

    fn node_parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.index()).and_then(|n| n.parent)
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.nodes.get(node.index()).map_or(0, |n| n.children)
    }

    fn root_node(&self) -> Option<NodeId> {
        self.root
    }

    fn curve(&self, node: NodeId, layer: LayerId, channel: Channel) -> Option<&MemoryCurve> {
        self.curves.get(&(node, layer, channel))
    }
}
