// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host abstraction over plug graphs.
//!
//! The scanner walks any graph exposing the small read-only surface
//! below, so it can run against [`sourcetrace_graph::Graph`] or against a
//! host application's own object model via an adapter.

use sourcetrace_graph::{Graph, NodeId, Plug, PlugDirection, PlugId, PlugValue};
use std::fmt::Debug;
use std::hash::Hash;

/// Read-only view of a plug graph
///
/// Lookups return `None` for handles the graph does not know about;
/// traversal only ever feeds back handles obtained from the same view.
pub trait PlugGraph {
    /// Node handle
    type Node: Copy + Eq + Hash + Debug;
    /// Plug handle
    type Plug: Copy + Eq + Hash + Debug;

    /// Top-level plugs of a node
    fn node_plugs(&self, node: Self::Node) -> Vec<Self::Plug>;

    /// Nested children of a plug (empty for leaf plugs)
    fn children(&self, plug: Self::Plug) -> Vec<Self::Plug>;

    /// Direction of a plug
    fn direction(&self, plug: Self::Plug) -> Option<PlugDirection>;

    /// Name of a plug
    fn name(&self, plug: Self::Plug) -> Option<&str>;

    /// String value held by a plug, if it is a string-valued leaf
    fn string_value(&self, plug: Self::Plug) -> Option<&str>;

    /// The plug connected into this one, if any
    fn input(&self, plug: Self::Plug) -> Option<Self::Plug>;

    /// The node owning a plug
    fn owner(&self, plug: Self::Plug) -> Option<Self::Node>;

    /// Ultimate source of a plug's input chain
    ///
    /// Follows pass-through connections transitively; a plug with no
    /// input is its own source.
    fn source(&self, plug: Self::Plug) -> Self::Plug {
        let mut current = plug;
        while let Some(input) = self.input(current) {
            current = input;
        }
        current
    }
}

impl PlugGraph for Graph {
    type Node = NodeId;
    type Plug = PlugId;

    fn node_plugs(&self, node: NodeId) -> Vec<PlugId> {
        self.plugs_of(node).map(|p| p.id).collect()
    }

    fn children(&self, plug: PlugId) -> Vec<PlugId> {
        self.plug(plug)
            .map(|p| p.children().to_vec())
            .unwrap_or_default()
    }

    fn direction(&self, plug: PlugId) -> Option<PlugDirection> {
        self.plug(plug).map(|p| p.direction)
    }

    fn name(&self, plug: PlugId) -> Option<&str> {
        self.plug(plug).map(|p| p.name.as_str())
    }

    fn string_value(&self, plug: PlugId) -> Option<&str> {
        self.plug(plug)
            .and_then(|p| p.value.as_ref())
            .and_then(PlugValue::as_str)
    }

    fn input(&self, plug: PlugId) -> Option<PlugId> {
        self.plug_input(plug)
    }

    fn owner(&self, plug: PlugId) -> Option<NodeId> {
        self.plug(plug).map(Plug::node)
    }

    fn source(&self, plug: PlugId) -> PlugId {
        self.plug_source(plug)
    }
}
