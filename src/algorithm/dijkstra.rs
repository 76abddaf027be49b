use std::fmt::Debug;
use log::{debug, trace};
use num_traits::Float;

use crate::graph::Graph;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult, SolveStats};
use crate::data_structures::BinaryHeapWrapper;
use crate::{Error, Result};

/// Classic Dijkstra's algorithm implementation
///
/// Uses a binary heap without decrease-key. When a vertex's tentative distance
/// improves it is pushed again, so the heap may hold several entries for the
/// same vertex. Entries whose key is larger than the vertex's best known
/// distance, or whose vertex is already finalized, are skipped when popped.
/// This keeps the run at O((V + E) log V).
///
/// Ties are deterministic: a predecessor is only replaced by a strictly
/// shorter distance, and equal keys leave the heap in push order, so the
/// first discovered edge reaching a minimal distance wins.
///
/// Edge weights are assumed non-negative. Graphs enforce that on construction.
#[derive(Debug, Default)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Float + Debug + Copy + Ord,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::NodeNotFound(format!("vertex {}", source)));
        }

        let n = graph.vertex_count();
        let mut stats = SolveStats::default();

        let mut distances: Vec<W> = vec![W::infinity(); n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut finalized = vec![false; n];

        distances[source] = W::zero();

        let mut queue = BinaryHeapWrapper::with_capacity(n);
        queue.push(source, W::zero());
        stats.heap_pushes += 1;

        while let Some((u, dist_u)) = queue.pop() {
            // Stale entry: u was re-queued with a smaller key after this push
            if finalized[u] || dist_u > distances[u] {
                stats.stale_pops += 1;
                continue;
            }
            finalized[u] = true;
            stats.finalized += 1;

            for (v, weight) in graph.outgoing_edges(u) {
                if finalized[v] {
                    continue;
                }
                let new_dist = dist_u + weight;
                if new_dist < distances[v] {
                    trace!("relax {} -> {}: {:?} -> {:?}", u, v, distances[v], new_dist);
                    distances[v] = new_dist;
                    predecessors[v] = Some(u);
                    queue.push(v, new_dist);
                    stats.heap_pushes += 1;
                    stats.relaxations += 1;
                }
            }
        }

        debug!(
            "Dijkstra from vertex {}: {} of {} vertices finalized, {} relaxations, {} stale pops",
            source, stats.finalized, n, stats.relaxations, stats.stale_pops
        );

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
            stats,
        })
    }
}
