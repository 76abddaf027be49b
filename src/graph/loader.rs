//! Conversion of an external JSON graph description into a [`GraphModel`]
//!
//! The expected payload is
//!
//! ```json
//! { "nodes": ["A", "B"], "edges": [{ "from": "A", "to": "B", "weight": 1.5 }] }
//! ```
//!
//! `source` and `target` are accepted in place of `from` and `to`. Shape
//! errors (missing fields, wrong types, non-numeric weights) are reported as
//! [`Error::MalformedGraph`], the same as graph-level violations.

use crate::graph::model::GraphModel;
use crate::{Error, Result};
use log::info;
use serde::{Deserialize, Serialize};

/// A directed, weighted edge as it appears in an uploaded description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDescription {
    #[serde(alias = "source")]
    pub from: String,
    #[serde(alias = "target")]
    pub to: String,
    pub weight: f64,
}

/// Structural description of a graph, as uploaded by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDescription {
    pub nodes: Vec<String>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

impl GraphDescription {
    /// Parses a description from raw JSON bytes
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|err| Error::MalformedGraph(format!("invalid graph JSON: {}", err)))
    }

    /// Validates the description and builds the graph it describes
    pub fn to_graph(&self) -> Result<GraphModel> {
        GraphModel::build(
            self.nodes.iter().cloned(),
            self.edges
                .iter()
                .map(|edge| (edge.from.as_str(), edge.to.as_str(), edge.weight)),
        )
    }
}

/// Builds a graph from an already-parsed description
pub fn load(description: &GraphDescription) -> Result<GraphModel> {
    let graph = description.to_graph()?;
    info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        description.edges.len()
    );
    Ok(graph)
}

/// Parses and builds a graph from raw JSON bytes
pub fn load_json(bytes: &[u8]) -> Result<GraphModel> {
    let description = GraphDescription::from_json_slice(bytes)?;
    load(&description)
}
