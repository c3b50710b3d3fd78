//! Iterative depth-first search
//!
//! LIFO counterpart of [`super::bfs`]. Vertices are marked when pushed, so
//! depths are only those of the discovery tree and carry no distance meaning.
//! The result is used for structural checks such as [`is_path_from`].
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use crate::algorithm::path_finding::bfs::{Traversal, VisitedSet};
use crate::algorithm::traits::VertexId;
use crate::data_structures::graph::Graph;

/// DFS from `root` with a fresh visited set
pub fn dfs<T>(graph: &Graph<T>, root: VertexId) -> Traversal {
    let mut visited = VisitedSet::new();
    dfs_with(graph, root, &mut visited)
}

/// DFS from `root` using a caller-owned visited set
pub fn dfs_with<T>(graph: &Graph<T>, root: VertexId, visited: &mut VisitedSet) -> Traversal {
    let mut traversal = Traversal::rooted_at(root);
    let mut stack = vec![root];
    visited.insert(root);

    while let Some(u) = stack.pop() {
        for (edge_id, edge) in graph.outgoing_edges(u) {
            let v = edge.to;
            if visited.insert(v) {
                traversal.discover(u, edge_id, v);
                stack.push(v);
            }
        }
    }

    traversal
}

/// Whether `graph` is a single path starting at `start`
///
/// Every vertex must be reachable from `start` and the discovery tree must be
/// one chain whose leaf sits at depth `|V| - 1`.
pub fn is_path_from<T>(graph: &Graph<T>, start: VertexId) -> bool {
    if !graph.contains_vertex(start) {
        return false;
    }

    let traversal = dfs(graph, start);
    let all_reached = graph.vertices().iter().all(|&v| traversal.reached(v));

    all_reached && traversal.max_depth() + 1 == graph.vertex_count()
}
