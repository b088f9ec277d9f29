// SPDX-License-Identifier: MIT OR Apache-2.0
//! Connection (edge) definitions for the graph.

use crate::plug::PlugId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    /// Create a new random connection ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// A connection between two plugs
///
/// `to_plug` is always the destination (input) side. `from_plug` is
/// usually an output, but input-to-input connections are allowed so that
/// compound plugs can pass a value through to a nested consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// Unique connection ID
    pub id: ConnectionId,
    /// Source plug ID
    pub from_plug: PlugId,
    /// Destination plug ID
    pub to_plug: PlugId,
}

impl Connection {
    /// Create a new connection
    pub fn new(from_plug: PlugId, to_plug: PlugId) -> Self {
        Self {
            id: ConnectionId::new(),
            from_plug,
            to_plug,
        }
    }

    /// Check if this connection involves a specific plug
    pub fn involves_plug(&self, plug_id: PlugId) -> bool {
        self.from_plug == plug_id || self.to_plug == plug_id
    }
}
