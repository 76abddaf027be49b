use std::fmt::Debug;
use num_traits::Float;

/// Trait representing a weighted directed graph whose vertices are dense indices
/// `0..vertex_count()` and carry a string identifier
pub trait Graph<W>: Debug
where
    W: Float + Debug + Copy,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns an iterator over the outgoing edges from a vertex, in insertion order
    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, W)> + '_>;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Gets the weight of the first edge between two vertices, if any
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing_edges(from)
            .find(|(target, _)| *target == to)
            .map(|(_, weight)| weight)
    }

    /// Resolves a node identifier to its vertex index
    fn index_of(&self, id: &str) -> Option<usize>;

    /// Returns the identifier of a vertex
    fn node_id(&self, vertex: usize) -> Option<&str>;
}
