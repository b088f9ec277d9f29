// SPDX-License-Identifier: MIT OR Apache-2.0
//! Plug definitions: named, directional connection points on nodes.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a plug
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlugId(pub Uuid);

impl PlugId {
    /// Create a new random plug ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlugId {
    fn default() -> Self {
        Self::new()
    }
}

/// Plug direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlugDirection {
    /// Input plug (receives data from upstream)
    Input,
    /// Output plug (feeds downstream inputs)
    Output,
}

/// Value stored on a plug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlugValue {
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Float
    Float(f64),
    /// String (file names, expressions, labels)
    String(String),
}

impl PlugValue {
    /// Get the string contents, if this is a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for PlugValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PlugValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// A plug on a node
///
/// Plugs form trees: a compound plug carries child plugs instead of a
/// value of its own. Ownership (`node`, `parent`, `children`) is managed
/// by [`crate::Graph`]; plugs are stored arena-style and referenced by ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plug {
    /// Unique plug ID
    pub id: PlugId,
    /// Plug name
    pub name: String,
    /// Plug direction
    pub direction: PlugDirection,
    /// Value held by the plug (leaf plugs only)
    pub value: Option<PlugValue>,
    /// Owning node
    pub(crate) node: NodeId,
    /// Parent plug, for nested plugs
    pub(crate) parent: Option<PlugId>,
    /// Child plugs, for compound plugs
    pub(crate) children: Vec<PlugId>,
}

impl Plug {
    /// Create a new plug owned by `node`
    pub(crate) fn new(
        name: impl Into<String>,
        direction: PlugDirection,
        node: NodeId,
        parent: Option<PlugId>,
    ) -> Self {
        Self {
            id: PlugId::new(),
            name: name.into(),
            direction,
            value: None,
            node,
            parent,
            children: Vec::new(),
        }
    }

    /// The node this plug belongs to
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The parent plug, if this plug is nested
    pub fn parent(&self) -> Option<PlugId> {
        self.parent
    }

    /// Child plug IDs
    pub fn children(&self) -> &[PlugId] {
        &self.children
    }

    /// Whether this plug has nested children
    pub fn is_compound(&self) -> bool {
        !self.children.is_empty()
    }
}
