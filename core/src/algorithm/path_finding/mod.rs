//! Traversal and shortest-path algorithms over weighted directed graphs
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod bellman_ford;
pub mod bfs;
pub mod dfs;
pub mod path;
pub mod shortest_path;

pub use self::bellman_ford::{bellman_ford_moore, Distances};
pub use self::bfs::{bfs, bfs_shortest_hop_path, bfs_with, Traversal, VisitedSet};
pub use self::dfs::{dfs, dfs_with, is_path_from};
pub use self::path::{Path, PathError};
pub use self::shortest_path::{
    shortest_path, shortest_path_from_distances, shortest_path_with_min_hop,
    shortest_path_with_min_hop_from_distances, DEFAULT_TIE_TOLERANCE,
};
