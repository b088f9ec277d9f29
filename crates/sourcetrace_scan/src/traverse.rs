// SPDX-License-Identifier: MIT OR Apache-2.0
//! Upstream traversal: collect reachable nodes and their source files.

use crate::resolve::{expand_env_vars, resolve_path};
use crate::view::PlugGraph;
use indexmap::IndexSet;
use sourcetrace_graph::{Context, PlugDirection};
use std::collections::{BTreeSet, HashSet};

/// Reserved plug name carrying a source-file path
pub const FILE_NAME_PLUG: &str = "fileName";

/// Result of an upstream scan
#[derive(Debug, Clone)]
pub struct UpstreamScan<N> {
    /// Distinct upstream nodes, in discovery order
    pub nodes: Vec<N>,
    /// Resolved source-file paths
    pub sources: BTreeSet<String>,
}

/// Error starting an upstream scan
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The start plug has no input connection to walk from
    #[error("start plug has no input connection")]
    UnconnectedPlug,
}

enum Work<N, P> {
    Visit(N),
    Scan(P),
}

/// Walk upstream from `start` and collect reachable nodes and source files
///
/// The scan begins at the node owning the plug connected into `start`,
/// then follows every input connection backwards, visiting each node at
/// most once. Leaf input plugs named [`FILE_NAME_PLUG`] contribute their
/// value to the source set, after placeholder resolution against
/// `context` and environment expansion.
///
/// Uses an explicit worklist rather than recursion, so arbitrarily deep
/// graphs cannot exhaust the call stack. The graph is never mutated.
pub fn collect_upstream<G: PlugGraph>(
    graph: &G,
    context: &Context,
    start: G::Plug,
) -> Result<UpstreamScan<G::Node>, ScanError> {
    let input = graph.input(start).ok_or(ScanError::UnconnectedPlug)?;
    let first = graph.owner(input).ok_or(ScanError::UnconnectedPlug)?;

    let mut visited: IndexSet<G::Node> = IndexSet::new();
    let mut sources = BTreeSet::new();
    let mut seen_names: HashSet<&str> = HashSet::new();

    visited.insert(first);
    let mut stack = vec![Work::Visit(first)];

    while let Some(work) = stack.pop() {
        match work {
            Work::Visit(node) => {
                tracing::trace!(?node, "visiting upstream node");
                push_input_plugs(graph, graph.node_plugs(node), &mut stack);
            }
            Work::Scan(plug) => {
                let children = graph.children(plug);
                if children.is_empty() {
                    if graph.name(plug) == Some(FILE_NAME_PLUG) {
                        // The guard is keyed by the plug name, not by plug
                        // identity or value, so a scan records at most one
                        // fileName value across the whole graph.
                        if seen_names.insert(FILE_NAME_PLUG) {
                            if let Some(value) = graph.string_value(plug) {
                                let resolved = expand_env_vars(&resolve_path(value, context));
                                sources.insert(resolved);
                            } else {
                                tracing::debug!(?plug, "fileName plug holds no string value");
                            }
                        }
                    }
                } else {
                    // Compound plug: scan each child in its own right.
                    push_input_plugs(graph, children, &mut stack);
                }

                if graph.input(plug).is_some() {
                    let source = graph.source(plug);
                    if let Some(upstream) = graph.owner(source) {
                        if visited.insert(upstream) {
                            stack.push(Work::Visit(upstream));
                        }
                    }
                }
            }
        }
    }

    Ok(UpstreamScan {
        nodes: visited.into_iter().collect(),
        sources,
    })
}

/// Queue input-direction plugs for scanning, preserving declaration order
fn push_input_plugs<G: PlugGraph>(
    graph: &G,
    plugs: Vec<G::Plug>,
    stack: &mut Vec<Work<G::Node, G::Plug>>,
) {
    for plug in plugs.into_iter().rev() {
        if graph.direction(plug) == Some(PlugDirection::Input) {
            stack.push(Work::Scan(plug));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sourcetrace_graph::{Graph, Node, NodeId, PlugId};

    /// Node with `in` / `fileName` / `out` plugs, in that order
    fn task_node(
        graph: &mut Graph,
        name: &str,
        file_name: Option<&str>,
    ) -> (NodeId, PlugId, PlugId) {
        let node = graph.add_node(Node::new(name));
        let input = graph.add_plug(node, "in", PlugDirection::Input).unwrap();
        if let Some(value) = file_name {
            let plug = graph
                .add_plug(node, FILE_NAME_PLUG, PlugDirection::Input)
                .unwrap();
            graph.set_plug_value(plug, value).unwrap();
        }
        let out = graph.add_plug(node, "out", PlugDirection::Output).unwrap();
        (node, input, out)
    }

    #[test]
    fn test_unconnected_start_is_an_error() {
        let mut graph = Graph::new("test");
        let node = graph.add_node(Node::new("Writer"));
        let input = graph.add_plug(node, "in", PlugDirection::Input).unwrap();

        let result = collect_upstream(&graph, &Context::new(), input);
        assert!(matches!(result, Err(ScanError::UnconnectedPlug)));
    }

    #[test]
    fn test_linear_chain_collects_nodes_in_discovery_order() {
        let mut graph = Graph::new("test");
        let (a, _, a_out) = task_node(&mut graph, "A", Some("${ROOT}/scene.abc"));
        let (b, b_in, b_out) = task_node(&mut graph, "B", None);
        let (c, c_in, c_out) = task_node(&mut graph, "C", None);
        let (_, w_in, _) = task_node(&mut graph, "Writer", None);
        graph.connect(a_out, b_in).unwrap();
        graph.connect(b_out, c_in).unwrap();
        graph.connect(c_out, w_in).unwrap();

        let context = Context::new().with_var("ROOT", "/data");
        let scan = collect_upstream(&graph, &context, w_in).unwrap();

        assert_eq!(scan.nodes, vec![c, b, a]);
        assert_eq!(
            scan.sources,
            BTreeSet::from(["/data/scene.abc".to_string()])
        );
    }

    #[test]
    fn test_diamond_visits_each_node_once() {
        let mut graph = Graph::new("test");
        let (a, _, a_out) = task_node(&mut graph, "A", None);
        let (b, b_in, b_out) = task_node(&mut graph, "B", None);
        let (c, c_in, c_out) = task_node(&mut graph, "C", None);
        let d = graph.add_node(Node::new("D"));
        let d_in1 = graph.add_plug(d, "in1", PlugDirection::Input).unwrap();
        let d_in2 = graph.add_plug(d, "in2", PlugDirection::Input).unwrap();
        let d_out = graph.add_plug(d, "out", PlugDirection::Output).unwrap();
        let (_, w_in, _) = task_node(&mut graph, "Writer", None);

        graph.connect(a_out, b_in).unwrap();
        graph.connect(a_out, c_in).unwrap();
        graph.connect(b_out, d_in1).unwrap();
        graph.connect(c_out, d_in2).unwrap();
        graph.connect(d_out, w_in).unwrap();

        let scan = collect_upstream(&graph, &Context::new(), w_in).unwrap();

        assert_eq!(scan.nodes.len(), 4);
        for node in [a, b, c, d] {
            assert_eq!(scan.nodes.iter().filter(|n| **n == node).count(), 1);
        }
    }

    #[test]
    fn test_name_guard_keeps_at_most_one_source() {
        let mut graph = Graph::new("test");
        let (_, _, a_out) = task_node(&mut graph, "A", Some("/caches/a.vdb"));
        let (_, b_in, b_out) = task_node(&mut graph, "B", Some("/caches/b.vdb"));
        let (_, c_in, c_out) = task_node(&mut graph, "C", Some("/caches/c.vdb"));
        let (_, w_in, _) = task_node(&mut graph, "Writer", None);
        graph.connect(a_out, b_in).unwrap();
        graph.connect(b_out, c_in).unwrap();
        graph.connect(c_out, w_in).unwrap();

        let scan = collect_upstream(&graph, &Context::new(), w_in).unwrap();

        // Deepest fileName is reached first; the name guard drops the rest.
        assert_eq!(
            scan.sources,
            BTreeSet::from(["/caches/a.vdb".to_string()])
        );
    }

    #[test]
    fn test_nested_filename_plug_is_discovered() {
        let mut graph = Graph::new("test");
        let reader = graph.add_node(Node::new("Reader"));
        let settings = graph
            .add_plug(reader, "settings", PlugDirection::Input)
            .unwrap();
        let file_name = graph.add_child_plug(settings, FILE_NAME_PLUG).unwrap();
        graph.set_plug_value(file_name, "/data/nested.exr").unwrap();
        let reader_out = graph.add_plug(reader, "out", PlugDirection::Output).unwrap();
        let (_, w_in, _) = task_node(&mut graph, "Writer", None);
        graph.connect(reader_out, w_in).unwrap();

        let scan = collect_upstream(&graph, &Context::new(), w_in).unwrap();

        assert_eq!(scan.nodes, vec![reader]);
        assert_eq!(
            scan.sources,
            BTreeSet::from(["/data/nested.exr".to_string()])
        );
    }

    #[test]
    fn test_unresolvable_placeholder_kept_verbatim() {
        let mut graph = Graph::new("test");
        let (_, _, a_out) = task_node(&mut graph, "A", Some("${MISSING}/x.abc"));
        let (_, w_in, _) = task_node(&mut graph, "Writer", None);
        graph.connect(a_out, w_in).unwrap();

        let scan = collect_upstream(&graph, &Context::new(), w_in).unwrap();

        assert_eq!(
            scan.sources,
            BTreeSet::from(["${MISSING}/x.abc".to_string()])
        );
    }

    #[test]
    fn test_environment_expansion_after_context_resolution() {
        std::env::set_var("SOURCETRACE_TEST_JOBS", "/jobs");

        let mut graph = Graph::new("test");
        let (_, _, a_out) = task_node(
            &mut graph,
            "A",
            Some("$SOURCETRACE_TEST_JOBS/${SHOW}/scene.abc"),
        );
        let (_, w_in, _) = task_node(&mut graph, "Writer", None);
        graph.connect(a_out, w_in).unwrap();

        let context = Context::new().with_var("SHOW", "alpha");
        let scan = collect_upstream(&graph, &context, w_in).unwrap();

        assert_eq!(
            scan.sources,
            BTreeSet::from(["/jobs/alpha/scene.abc".to_string()])
        );
    }

    #[test]
    fn test_passthrough_source_reaches_owning_node() {
        let mut graph = Graph::new("test");
        let (a, _, a_out) = task_node(&mut graph, "A", None);
        let (b, b_in, _) = task_node(&mut graph, "B", None);
        let (_, w_in, _) = task_node(&mut graph, "Writer", None);
        graph.connect(a_out, b_in).unwrap();
        // Writer's input comes from B's own input plug, passed through.
        graph.connect(b_in, w_in).unwrap();

        let scan = collect_upstream(&graph, &Context::new(), w_in).unwrap();

        // B owns the directly connected plug; A is found by following the
        // pass-through chain to its source.
        assert_eq!(scan.nodes, vec![b, a]);
    }
}
