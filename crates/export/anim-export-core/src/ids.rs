//! Identifiers for scene registries (animation stacks, layers, nodes).

use serde::{Deserialize, Serialize};

/// Position of an animation stack in the scene's stack registry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StackId(pub u32);

/// Position of an animation layer in the scene's layer registry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// Position of a node in the scene's node registry.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl StackId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl LayerId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_index_their_registry() {
        assert_eq!(StackId(3).index(), 3);
        assert_eq!(LayerId(0).index(), 0);
        assert_eq!(NodeId(1).index(), 1);
        assert!(NodeId(1) < NodeId(2));
    }
}
