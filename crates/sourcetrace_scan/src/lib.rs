// SPDX-License-Identifier: MIT OR Apache-2.0
//! Upstream source-file scanning for sourcetrace graphs.
//!
//! Given a connected plug on the output side of a graph, this crate
//! walks upstream through every input connection and reports:
//! - The distinct nodes reachable upstream, in discovery order
//! - The source-file paths found on `fileName` plugs along the way,
//!   with `${NAME}` session variables and environment variables expanded
//!
//! ## Architecture
//!
//! The walker is written against the [`PlugGraph`] trait rather than a
//! concrete graph type, so host object models can be adapted in and the
//! traversal tested with fakes. Resolution state (visited set, skip
//! list) lives in function-local accumulators; nothing global is read
//! except the process environment during the final expansion pass.

pub mod resolve;
pub mod traverse;
pub mod view;

pub use resolve::{expand_env_vars, resolve_path};
pub use traverse::{collect_upstream, ScanError, UpstreamScan, FILE_NAME_PLUG};
pub use view::PlugGraph;
