use crate::graph::traits::Graph;
use crate::{Error, Result};
use log::debug;
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// Edge weight type used by loaded graphs
pub type Weight = OrderedFloat<f64>;

/// A directed graph keyed by string node identifiers
///
/// Nodes are stored in a dense table in the order they were declared, and every
/// edge refers to its target by index into that table. The topology never
/// changes after [`GraphModel::build`]; solver output is kept elsewhere.
#[derive(Debug, Clone)]
pub struct GraphModel {
    /// Node identifiers, indexed by vertex
    ids: Vec<String>,

    /// Identifier -> vertex index
    index: HashMap<String, usize>,

    /// Outgoing edges for each vertex: vertex -> [(target_vertex, weight)]
    outgoing_edges: Vec<Vec<(usize, Weight)>>,

    edge_count: usize,

    /// Sum of all edge weights, always finite
    total_weight: f64,
}

/// Read-only view of one node of a [`GraphModel`]
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    pub index: usize,
    pub id: &'a str,
    edges: &'a [(usize, Weight)],
}

impl<'a> Node<'a> {
    /// Outgoing edges as (target index, weight), in declaration order
    pub fn outgoing_edges(&self) -> impl Iterator<Item = (usize, f64)> + 'a {
        let edges = self.edges;
        edges.iter().map(|(target, weight)| (*target, weight.into_inner()))
    }

    pub fn out_degree(&self) -> usize {
        self.edges.len()
    }
}

impl GraphModel {
    /// Builds a graph from a set of node identifiers and `(from, to, weight)` edges
    ///
    /// Fails with [`Error::MalformedGraph`] when a node id is empty or repeated,
    /// an edge names an unknown node, a weight is negative or not finite, or the
    /// weights together sum past `f64::MAX`.
    pub fn build<I, S, E, A, B>(node_ids: I, edges: E) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = (A, B, f64)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut ids = Vec::new();
        let mut index = HashMap::new();

        for id in node_ids {
            let id: String = id.into();
            if id.is_empty() {
                return Err(Error::MalformedGraph("node id must not be empty".to_string()));
            }
            if index.contains_key(&id) {
                return Err(Error::MalformedGraph(format!("duplicate node id '{}'", id)));
            }
            index.insert(id.clone(), ids.len());
            ids.push(id);
        }

        let mut outgoing_edges = vec![Vec::new(); ids.len()];
        let mut edge_count = 0;
        let mut total_weight = 0.0_f64;

        for (from, to, weight) in edges {
            let (from, to) = (from.as_ref(), to.as_ref());
            let u = *index.get(from).ok_or_else(|| {
                Error::MalformedGraph(format!("edge {} -> {} references unknown node '{}'", from, to, from))
            })?;
            let v = *index.get(to).ok_or_else(|| {
                Error::MalformedGraph(format!("edge {} -> {} references unknown node '{}'", from, to, to))
            })?;

            if !weight.is_finite() {
                return Err(Error::MalformedGraph(format!(
                    "edge {} -> {} has non-finite weight {}",
                    from, to, weight
                )));
            }
            if weight < 0.0 {
                return Err(Error::MalformedGraph(format!(
                    "edge {} -> {} has negative weight {}",
                    from, to, weight
                )));
            }

            // Bounds every shortest path distance, so solves never overflow to infinity
            total_weight += weight;
            if !total_weight.is_finite() {
                return Err(Error::MalformedGraph(format!(
                    "total edge weight overflows at edge {} -> {}",
                    from, to
                )));
            }

            outgoing_edges[u].push((v, OrderedFloat(weight)));
            edge_count += 1;
        }

        debug!("Built graph with {} nodes and {} edges", ids.len(), edge_count);

        Ok(GraphModel {
            ids,
            index,
            outgoing_edges,
            edge_count,
            total_weight,
        })
    }

    /// Looks up a node by identifier
    pub fn get_node(&self, id: &str) -> Result<Node<'_>> {
        let index = self
            .index_of(id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?;
        Ok(self.node_at(index))
    }

    /// Sum of all edge weights; no shortest path distance exceeds it
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Iterates node identifiers in declaration order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    /// Iterates all nodes in declaration order
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        (0..self.ids.len()).map(move |i| self.node_at(i))
    }

    /// Weight of the first declared edge `from -> to`, by node id
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let u = self.index_of(from)?;
        let v = self.index_of(to)?;
        self.get_edge_weight(u, v).map(OrderedFloat::into_inner)
    }

    fn node_at(&self, index: usize) -> Node<'_> {
        Node {
            index,
            id: &self.ids[index],
            edges: &self.outgoing_edges[index],
        }
    }
}

impl Graph<Weight> for GraphModel {
    fn vertex_count(&self) -> usize {
        self.ids.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, Weight)> + '_> {
        match self.outgoing_edges.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn node_id(&self, vertex: usize) -> Option<&str> {
        self.ids.get(vertex).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> GraphModel {
        GraphModel::build(
            ["A", "B", "C", "D"],
            [("A", "B", 1.0), ("B", "C", 2.0), ("A", "C", 5.0), ("C", "D", 1.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_build_indexes_nodes_in_declaration_order() {
        let graph = diamond();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.node_ids().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
        assert_eq!(graph.index_of("C"), Some(2));
        assert_eq!(graph.node_id(3), Some("D"));
        assert_eq!(graph.edge_weight("A", "C"), Some(5.0));
        assert_eq!(graph.edge_weight("C", "A"), None);

        let degrees: Vec<(usize, usize)> = graph.nodes().map(|n| (n.index, n.out_degree())).collect();
        assert_eq!(degrees, vec![(0, 2), (1, 1), (2, 1), (3, 0)]);
    }

    #[test]
    fn test_get_node_exposes_outgoing_edges_in_order() {
        let graph = diamond();
        let a = graph.get_node("A").unwrap();
        assert_eq!(a.id, "A");
        assert_eq!(a.out_degree(), 2);
        assert_eq!(a.outgoing_edges().collect::<Vec<_>>(), vec![(1, 1.0), (2, 5.0)]);
    }

    #[test]
    fn test_get_node_unknown_id() {
        let graph = diamond();
        assert_eq!(
            graph.get_node("Z").unwrap_err(),
            Error::NodeNotFound("Z".to_string())
        );
    }

    #[test]
    fn test_build_rejects_empty_and_duplicate_ids() {
        let empty = GraphModel::build(["A", ""], Vec::<(&str, &str, f64)>::new());
        assert!(matches!(empty, Err(Error::MalformedGraph(_))));

        let duplicate = GraphModel::build(["A", "B", "A"], Vec::<(&str, &str, f64)>::new());
        assert!(matches!(duplicate, Err(Error::MalformedGraph(msg)) if msg.contains("duplicate")));
    }

    #[test]
    fn test_build_rejects_bad_weights() {
        for weight in [-1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = GraphModel::build(["A", "B"], [("A", "B", weight)]);
            assert!(
                matches!(result, Err(Error::MalformedGraph(_))),
                "weight {} should be rejected",
                weight
            );
        }
    }

    #[test]
    fn test_build_rejects_weights_whose_sum_overflows() {
        let result = GraphModel::build(["A", "B", "C"], [("A", "B", 1e308), ("B", "C", 1e308)]);
        assert!(matches!(result, Err(Error::MalformedGraph(msg)) if msg.contains("overflows")));

        let graph = GraphModel::build(["A", "B", "C"], [("A", "B", 8e307), ("B", "C", 8e307)]).unwrap();
        assert!(graph.total_weight().is_finite());
        assert!(graph.total_weight() > 1e308);
    }

    #[test]
    fn test_build_accepts_zero_weight_and_parallel_edges() {
        let graph = GraphModel::build(["A", "B"], [("A", "B", 0.0), ("A", "B", 3.0)]).unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edge_weight("A", "B"), Some(0.0));
    }

    #[test]
    fn test_build_rejects_unknown_endpoint() {
        let result = GraphModel::build(["A"], [("A", "B", 1.0)]);
        assert!(matches!(result, Err(Error::MalformedGraph(msg)) if msg.contains("'B'")));
    }
}
