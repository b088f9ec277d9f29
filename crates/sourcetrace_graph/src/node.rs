// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph model.

use crate::plug::PlugId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node instance in the graph
///
/// Nodes have identity-based equality (via [`NodeId`]) and own a tree of
/// plugs; only the top-level plug IDs are recorded here, nested children
/// hang off their parent [`crate::Plug`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Top-level plugs, in creation order
    pub(crate) plugs: Vec<PlugId>,
}

impl Node {
    /// Create a new node with no plugs
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            name: name.into(),
            plugs: Vec::new(),
        }
    }

    /// Top-level plug IDs
    pub fn plugs(&self) -> &[PlugId] {
        &self.plugs
    }
}
