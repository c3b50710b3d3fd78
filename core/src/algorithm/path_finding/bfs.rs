//! Breadth-first search
//!
//! FIFO traversal from a root vertex. Depths are true hop distances. When
//! several edges could discover the same vertex in one layer, the edge that
//! comes first in the graph's edge list wins, because each dequeued vertex
//! scans its outgoing edges in that order and a vertex is marked on discovery.
//!
//! Visited state never lives on the graph: it is a `VisitedSet` owned by the
//! caller, so one graph can be traversed by any number of concurrent solves.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, HashSet, VecDeque};

use log::trace;

use crate::algorithm::path_finding::path::{Path, PathError};
use crate::algorithm::traits::{EdgeId, VertexId};
use crate::data_structures::graph::Graph;

/// Traversal-scoped visited marker, keyed by vertex identity
pub type VisitedSet = HashSet<VertexId>;

/// Parent and depth structure produced by BFS or DFS
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Traversal {
    /// Reached non-root vertex -> vertex that first discovered it
    pub parents: HashMap<VertexId, VertexId>,

    /// Reached non-root vertex -> edge it was discovered through
    pub parent_edges: HashMap<VertexId, EdgeId>,

    /// Reached vertex -> hop count from the root (root is 0)
    pub depths: HashMap<VertexId, usize>,
}

impl Traversal {
    pub(crate) fn rooted_at(root: VertexId) -> Self {
        let mut traversal = Self::default();
        traversal.depths.insert(root, 0);
        traversal
    }

    pub(crate) fn discover(&mut self, parent: VertexId, via: EdgeId, child: VertexId) {
        let depth = self.depths.get(&parent).copied().unwrap_or(0) + 1;
        self.parents.insert(child, parent);
        self.parent_edges.insert(child, via);
        self.depths.insert(child, depth);
    }

    pub fn reached(&self, v: VertexId) -> bool {
        self.depths.contains_key(&v)
    }

    pub fn depth(&self, v: VertexId) -> Option<usize> {
        self.depths.get(&v).copied()
    }

    pub fn max_depth(&self) -> usize {
        self.depths.values().copied().max().unwrap_or(0)
    }

    /// Walks parent edges back from `target` to `root`
    pub fn path_to(&self, root: VertexId, target: VertexId) -> Result<Path, PathError> {
        let no_path = PathError::NoPath { from: root, to: target };

        let mut vertices = vec![target];
        let mut edges = Vec::new();
        let mut head = target;

        while head != root {
            let parent = *self.parents.get(&head).ok_or_else(|| no_path.clone())?;
            let edge = *self.parent_edges.get(&head).ok_or_else(|| no_path.clone())?;
            vertices.push(parent);
            edges.push(edge);
            head = parent;
        }

        Ok(Path::from_backward_walk(vertices, edges))
    }
}

/// BFS from `root` with a fresh visited set
pub fn bfs<T>(graph: &Graph<T>, root: VertexId, target: Option<VertexId>) -> Traversal {
    let mut visited = VisitedSet::new();
    bfs_with(graph, root, target, &mut visited)
}

/// BFS from `root` using a caller-owned visited set
///
/// Vertices already in `visited` are treated as reached and never
/// rediscovered. With `target` set, the search stops as soon as the target is
/// discovered.
pub fn bfs_with<T>(
    graph: &Graph<T>,
    root: VertexId,
    target: Option<VertexId>,
    visited: &mut VisitedSet,
) -> Traversal {
    let mut traversal = Traversal::rooted_at(root);
    let mut queue = VecDeque::from([root]);
    visited.insert(root);

    if target == Some(root) {
        return traversal;
    }

    while let Some(u) = queue.pop_front() {
        for (edge_id, edge) in graph.outgoing_edges(u) {
            let v = edge.to;
            if !visited.insert(v) {
                continue;
            }

            traversal.discover(u, edge_id, v);
            queue.push_back(v);

            if target == Some(v) {
                trace!("bfs from {} reached target {} early", root, v);
                return traversal;
            }
        }
    }

    traversal
}

/// Fewest-hop path from `root` to `target`
pub fn bfs_shortest_hop_path<T>(
    graph: &Graph<T>,
    root: VertexId,
    target: VertexId,
) -> Result<Path, PathError> {
    bfs(graph, root, Some(target)).path_to(root, target)
}
