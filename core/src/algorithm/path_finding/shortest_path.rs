//! Shortest-path reconstruction from distance labels
//!
//! Both routines walk backward from the target over *tight* edges, i.e.
//! incoming edges `e` with `weight(e) + dist(e.from) == dist(head)` up to an
//! absolute tolerance. A head whose label can still be lowered through one of
//! its incoming edges is not a fixed point of the relaxation, which only
//! happens when a negative cycle feeds it; such heads are rejected with
//! [`PathError::NegativeCycleDetected`].
//!
//! * [`shortest_path_from_distances`] follows the first tight edge at every
//!   step.
//! * [`shortest_path_with_min_hop_from_distances`] collects every tight edge
//!   into a tie-tree grown layer by layer from the target, then extracts the
//!   fewest-hop source-to-target path from that tree with BFS. The flow driver
//!   uses it so that each augmentation follows the shortest cost-optimal path.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::{HashMap, HashSet, VecDeque};

use log::trace;

use crate::algorithm::path_finding::bellman_ford::{bellman_ford_moore, Distances};
use crate::algorithm::path_finding::bfs::bfs_shortest_hop_path;
use crate::algorithm::path_finding::path::{Path, PathError};
use crate::algorithm::traits::{EdgeId, VertexId};
use crate::data_structures::graph::{Edge, Graph, Weight};

/// Default absolute tolerance for tight-edge detection
pub const DEFAULT_TIE_TOLERANCE: Weight = 1e-9;

/// Incoming edges of `head` that attain its label, in edge-list order
fn tight_predecessors<'g, T>(
    graph: &'g Graph<T>,
    distances: &Distances,
    head: VertexId,
    tolerance: Weight,
) -> Result<Vec<(EdgeId, &'g Edge)>, PathError> {
    let label = distances.get(head);
    let mut tight = Vec::new();

    for (edge_id, edge) in graph.incoming_edges(head) {
        let from = distances.get(edge.from);
        if !from.is_finite() {
            continue;
        }

        let candidate = from + edge.weight;
        if candidate < label - tolerance {
            return Err(PathError::NegativeCycleDetected { vertex: head });
        }
        if (candidate - label).abs() <= tolerance {
            tight.push((edge_id, edge));
        }
    }

    Ok(tight)
}

/// Rejects labels where a negative cycle runs through the source itself
///
/// The source is never expanded as a head, so its label is checked here: any
/// value below zero means a cycle returned to it cheaper than staying put.
fn check_source_label(
    distances: &Distances,
    source: VertexId,
    tolerance: Weight,
) -> Result<(), PathError> {
    if distances.get(source) < -tolerance {
        return Err(PathError::NegativeCycleDetected { vertex: source });
    }
    Ok(())
}

/// Reconstructs one shortest path from `source` to `target`
///
/// Fails with `NoPath` when the target is unreached or some head has no
/// tight incoming edge, and with `NegativeCycleDetected` when the walk
/// revisits a vertex, meets a label that is not a fixed point, or the source
/// label has dropped below zero.
pub fn shortest_path_from_distances<T>(
    graph: &Graph<T>,
    distances: &Distances,
    source: VertexId,
    target: VertexId,
    tolerance: Weight,
) -> Result<Path, PathError> {
    let no_path = PathError::NoPath { from: source, to: target };
    if !distances.is_reachable(target) {
        return Err(no_path);
    }
    check_source_label(distances, source, tolerance)?;

    let mut vertices = vec![target];
    let mut edges = Vec::new();
    let mut on_path = HashSet::from([target]);
    let mut head = target;

    while head != source {
        let tight = tight_predecessors(graph, distances, head, tolerance)?;
        let (edge_id, edge) = *tight.first().ok_or_else(|| no_path.clone())?;

        if !on_path.insert(edge.from) {
            return Err(PathError::NegativeCycleDetected { vertex: edge.from });
        }

        vertices.push(edge.from);
        edges.push(edge_id);
        head = edge.from;
    }

    Ok(Path::from_backward_walk(vertices, edges))
}

/// Reconstructs the fewest-hop path among all shortest paths
///
/// The tie-tree holds every tight edge reachable backward from the target,
/// except edges whose tail already sits in the tree at a depth smaller than
/// `depth(head) + 1`; those would close a zero-or-negative cycle inside the
/// tie structure. Depth strictly grows along kept edges, so the extracted
/// path never repeats a vertex. The source is entered into the tree but not
/// expanded.
pub fn shortest_path_with_min_hop_from_distances<T>(
    graph: &Graph<T>,
    distances: &Distances,
    source: VertexId,
    target: VertexId,
    tolerance: Weight,
) -> Result<Path, PathError> {
    let no_path = PathError::NoPath { from: source, to: target };
    if !distances.is_reachable(target) {
        return Err(no_path);
    }
    check_source_label(distances, source, tolerance)?;
    if source == target {
        return Ok(Path::trivial(source));
    }

    let mut tie_tree = graph.with_same_vertices();
    let mut tie_origin: Vec<EdgeId> = Vec::new();
    let mut depths: HashMap<VertexId, usize> = HashMap::from([(target, 0)]);
    let mut heads = VecDeque::from([target]);

    while let Some(head) = heads.pop_front() {
        let head_depth = depths.get(&head).copied().unwrap_or(0);

        for (edge_id, edge) in tight_predecessors(graph, distances, head, tolerance)? {
            let tail = edge.from;
            match depths.get(&tail) {
                Some(&depth) if depth < head_depth + 1 => continue,
                Some(_) => {}
                None => {
                    depths.insert(tail, head_depth + 1);
                    if tail != source {
                        heads.push_back(tail);
                    }
                }
            }

            tie_tree.push_edge(edge.clone());
            tie_origin.push(edge_id);
        }
    }

    trace!(
        "tie-tree toward {} holds {} vertices and {} edges",
        target,
        depths.len(),
        tie_tree.edge_count()
    );

    if !depths.contains_key(&source) {
        return Err(no_path);
    }

    let path = bfs_shortest_hop_path(&tie_tree, source, target)?;
    Ok(path.map_edges(|id| tie_origin[id.as_usize()]))
}

/// Bellman–Ford–Moore followed by plain reconstruction
pub fn shortest_path<T>(
    graph: &Graph<T>,
    source: VertexId,
    target: VertexId,
) -> Result<Path, PathError> {
    let distances = bellman_ford_moore(graph, source);
    shortest_path_from_distances(graph, &distances, source, target, DEFAULT_TIE_TOLERANCE)
}

/// Bellman–Ford–Moore followed by min-hop reconstruction
pub fn shortest_path_with_min_hop<T>(
    graph: &Graph<T>,
    source: VertexId,
    target: VertexId,
) -> Result<Path, PathError> {
    let distances = bellman_ford_moore(graph, source);
    shortest_path_with_min_hop_from_distances(
        graph,
        &distances,
        source,
        target,
        DEFAULT_TIE_TOLERANCE,
    )
}
