// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node/plug graph model for sourcetrace.
//!
//! This crate provides the object model the upstream scanner walks:
//! - Nodes with identity-based equality
//! - Named, directional plugs that nest into trees
//! - Validated plug-to-plug connections, including input-to-input
//!   pass-throughs
//! - The session [`Context`] holding variable bindings
//!
//! ## Architecture
//!
//! The model is deliberately host-agnostic: plugs are stored arena-style
//! inside [`Graph`] and addressed by ID, so traversal code can be written
//! against lookups rather than object references. Everything serializes
//! with `serde`.

pub mod connection;
pub mod context;
pub mod graph;
pub mod node;
pub mod plug;

pub use connection::{Connection, ConnectionId};
pub use context::Context;
pub use graph::{ConnectionError, Graph, GraphError};
pub use node::{Node, NodeId};
pub use plug::{Plug, PlugDirection, PlugId, PlugValue};
