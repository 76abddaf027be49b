//! Path Solver - single-source shortest paths over an uploaded graph
//!
//! A weighted directed graph is loaded from a JSON description, held as the
//! single active graph of a [`ShortestPathService`], and queried for the
//! shortest route between two named nodes using Dijkstra's algorithm.
//!
//! The graph topology is immutable once built. Every solve produces its own
//! [`ShortestPathResult`] (distance and predecessor arrays indexed by node),
//! so queries never mutate shared state and can run concurrently.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod service;
pub mod web;

pub use algorithm::{
    dijkstra::Dijkstra, path::ShortestPath, ShortestPathAlgorithm, ShortestPathResult,
};
/// Re-export main types for convenient use
pub use graph::{loader::GraphDescription, model::GraphModel};
pub use service::{ActiveGraph, PathAnswer, ShortestPathService};

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Malformed graph: {0}")]
    MalformedGraph(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("No active graph, please upload a graph first")]
    NoActiveGraph,

    #[error("Path inconsistency: {0}")]
    PathInconsistency(String),

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
