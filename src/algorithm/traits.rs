use std::fmt::Debug;
use num_traits::Float;
use crate::algorithm::path;
use crate::graph::Graph;
use crate::{Error, Result};

/// Counters collected while a solve runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Entries pushed onto the priority queue, the source included
    pub heap_pushes: usize,
    /// Popped entries discarded because a shorter distance was already known
    pub stale_pops: usize,
    /// Edge relaxations that improved a tentative distance
    pub relaxations: usize,
    /// Vertices whose distance became final
    pub finalized: usize,
}

/// Result of a shortest path algorithm execution
///
/// Owned by the caller and independent of the graph it was computed from, so
/// several results for different sources can coexist.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathResult<W>
where
    W: Float + Debug + Copy,
{
    /// Distance from source to each vertex; infinity when unreachable
    pub distances: Vec<W>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,

    pub stats: SolveStats,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Debug + Copy,
{
    /// Number of vertices the result was computed for
    pub fn vertex_count(&self) -> usize {
        self.distances.len()
    }

    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.distances.get(vertex).copied()
    }

    pub fn is_reachable(&self, vertex: usize) -> bool {
        self.distance(vertex).map_or(false, |d| d.is_finite())
    }

    pub fn reachable_count(&self) -> usize {
        self.distances.iter().filter(|d| d.is_finite()).count()
    }
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Compute shortest paths from the node with the given identifier
    fn solve(&self, graph: &G, source_id: &str) -> Result<ShortestPathResult<W>> {
        let source = graph
            .index_of(source_id)
            .ok_or_else(|| Error::NodeNotFound(source_id.to_string()))?;
        self.compute_shortest_paths(graph, source)
    }

    /// Get the shortest path from source to target as a sequence of vertices
    ///
    /// `Ok(None)` means the target is unreachable.
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Result<Option<Vec<usize>>> {
        path::reconstruct(result, target)
    }
}
