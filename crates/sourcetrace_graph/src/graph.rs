// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure containing nodes, plugs and connections.

use crate::connection::{Connection, ConnectionId};
use crate::node::{Node, NodeId};
use crate::plug::{Plug, PlugDirection, PlugId, PlugValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph
///
/// Plugs are stored arena-style next to the nodes that own them, so that
/// nested plug trees and cross-node connections can both be addressed by
/// [`PlugId`] alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Nodes in the graph
    nodes: IndexMap<NodeId, Node>,
    /// All plugs, including nested children
    plugs: IndexMap<PlugId, Plug>,
    /// Connections between plugs
    connections: IndexMap<ConnectionId, Connection>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            plugs: IndexMap::new(),
            connections: IndexMap::new(),
        }
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node, its plug subtree and every connection touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        let node = self.nodes.swap_remove(&node_id)?;
        let removed: Vec<PlugId> = self
            .plugs
            .values()
            .filter(|p| p.node() == node_id)
            .map(|p| p.id)
            .collect();
        for plug_id in &removed {
            self.plugs.swap_remove(plug_id);
        }
        self.connections
            .retain(|_, c| !removed.iter().any(|p| c.involves_plug(*p)));
        Some(node)
    }

    /// Get a node by ID
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get all nodes
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Get the number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add a top-level plug to a node
    pub fn add_plug(
        &mut self,
        node_id: NodeId,
        name: impl Into<String>,
        direction: PlugDirection,
    ) -> Result<PlugId, GraphError> {
        let node = self
            .nodes
            .get_mut(&node_id)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        let plug = Plug::new(name, direction, node_id, None);
        let id = plug.id;
        node.plugs.push(id);
        self.plugs.insert(id, plug);
        Ok(id)
    }

    /// Add a nested child plug under an existing plug
    ///
    /// The child belongs to the same node and inherits the parent's
    /// direction.
    pub fn add_child_plug(
        &mut self,
        parent_id: PlugId,
        name: impl Into<String>,
    ) -> Result<PlugId, GraphError> {
        let parent = self
            .plugs
            .get(&parent_id)
            .ok_or(GraphError::PlugNotFound(parent_id))?;
        let plug = Plug::new(name, parent.direction, parent.node(), Some(parent_id));
        let id = plug.id;
        self.plugs.insert(id, plug);
        if let Some(parent) = self.plugs.get_mut(&parent_id) {
            parent.children.push(id);
        }
        Ok(id)
    }

    /// Set the value held by a plug
    pub fn set_plug_value(
        &mut self,
        plug_id: PlugId,
        value: impl Into<PlugValue>,
    ) -> Result<(), GraphError> {
        let plug = self
            .plugs
            .get_mut(&plug_id)
            .ok_or(GraphError::PlugNotFound(plug_id))?;
        plug.value = Some(value.into());
        Ok(())
    }

    /// Get a plug by ID
    pub fn plug(&self, plug_id: PlugId) -> Option<&Plug> {
        self.plugs.get(&plug_id)
    }

    /// Get a node's top-level plugs
    pub fn plugs_of(&self, node_id: NodeId) -> impl Iterator<Item = &Plug> {
        self.nodes
            .get(&node_id)
            .map(|n| n.plugs.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|id| self.plugs.get(id))
    }

    /// Get the number of plugs (including nested children)
    pub fn plug_count(&self) -> usize {
        self.plugs.len()
    }

    /// Add a connection between plugs
    ///
    /// The destination must be an input plug with no existing connection,
    /// and the two plugs must belong to different nodes. The source may be
    /// an output or another input (pass-through).
    pub fn connect(
        &mut self,
        from_plug: PlugId,
        to_plug: PlugId,
    ) -> Result<ConnectionId, ConnectionError> {
        let source = self
            .plugs
            .get(&from_plug)
            .ok_or(ConnectionError::PlugNotFound(from_plug))?;
        let dest = self
            .plugs
            .get(&to_plug)
            .ok_or(ConnectionError::PlugNotFound(to_plug))?;

        if dest.direction != PlugDirection::Input {
            return Err(ConnectionError::NotAnInput(to_plug));
        }
        if self.connections.values().any(|c| c.to_plug == to_plug) {
            return Err(ConnectionError::AlreadyConnected(to_plug));
        }
        if source.node() == dest.node() {
            return Err(ConnectionError::SelfLoop);
        }

        let connection = Connection::new(from_plug, to_plug);
        let id = connection.id;
        self.connections.insert(id, connection);
        Ok(id)
    }

    /// Remove a connection
    pub fn disconnect(&mut self, connection_id: ConnectionId) -> Option<Connection> {
        self.connections.swap_remove(&connection_id)
    }

    /// Get a connection by ID
    pub fn connection(&self, connection_id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&connection_id)
    }

    /// Get all connections
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    /// Get the number of connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the plug connected into `plug_id`, if any
    pub fn plug_input(&self, plug_id: PlugId) -> Option<PlugId> {
        self.connections
            .values()
            .find(|c| c.to_plug == plug_id)
            .map(|c| c.from_plug)
    }

    /// Follow the input chain of `plug_id` to its ultimate source
    ///
    /// Returns the plug itself when it has no input. Pass-through
    /// (input-to-input) connections are followed transitively.
    pub fn plug_source(&self, plug_id: PlugId) -> PlugId {
        let mut current = plug_id;
        while let Some(input) = self.plug_input(current) {
            current = input;
        }
        current
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

/// Error when manipulating nodes and plugs
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Plug not found
    #[error("Plug not found: {0:?}")]
    PlugNotFound(PlugId),
}

/// Error when creating a connection
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// Plug not found
    #[error("Plug not found: {0:?}")]
    PlugNotFound(PlugId),

    /// Destination plug is not an input
    #[error("Destination plug is not an input: {0:?}")]
    NotAnInput(PlugId),

    /// Destination plug already has a connection
    #[error("Plug already connected: {0:?}")]
    AlreadyConnected(PlugId),

    /// Both plugs belong to the same node
    #[error("Connection within a single node not allowed")]
    SelfLoop,
}
