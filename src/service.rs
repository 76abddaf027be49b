//! The single-active-graph service boundary
//!
//! [`ShortestPathService`] holds at most one loaded graph. A successful load
//! replaces it wholesale; a failed load leaves the previous graph in place.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::algorithm::dijkstra::Dijkstra;
use crate::algorithm::path::path_to;
use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::loader::{self, GraphDescription};
use crate::graph::{Graph, GraphModel, Weight};
use crate::{Error, Result};

/// Answer to a shortest path query; both fields are `None` when the target is unreachable
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathAnswer {
    pub shortest_path: Option<Vec<String>>,
    pub total_distance: Option<f64>,
}

impl PathAnswer {
    pub fn unreachable() -> Self {
        PathAnswer {
            shortest_path: None,
            total_distance: None,
        }
    }
}

/// The currently loaded graph and where it came from
#[derive(Debug, Clone)]
pub struct ActiveGraph {
    pub id: Uuid,
    /// Upload name, usually the file name
    pub name: String,
    pub loaded_at: DateTime<Utc>,
    pub graph: Arc<GraphModel>,
}

impl ActiveGraph {
    fn new(name: impl Into<String>, graph: GraphModel) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            loaded_at: Utc::now(),
            graph: Arc::new(graph),
        }
    }
}

/// Runs Dijkstra from `source_id` and reconstructs the route to `target_id`
///
/// Both ids are checked before solving, so an unknown target never costs a solve.
pub fn solve_and_path(graph: &GraphModel, source_id: &str, target_id: &str) -> Result<PathAnswer> {
    graph.get_node(source_id)?;
    graph.get_node(target_id)?;

    let result: ShortestPathResult<Weight> = Dijkstra::new().solve(graph, source_id)?;
    let answer = match path_to(graph, &result, target_id)? {
        Some(path) => PathAnswer {
            shortest_path: Some(path.nodes),
            total_distance: Some(path.total_distance),
        },
        None => PathAnswer::unreachable(),
    };
    Ok(answer)
}

/// Owner of the single active graph
#[derive(Debug, Default)]
pub struct ShortestPathService {
    active: Option<ActiveGraph>,
}

impl ShortestPathService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `description` and makes it the active graph
    pub fn load(&mut self, name: &str, description: &GraphDescription) -> Result<&ActiveGraph> {
        let graph = loader::load(description).map_err(|err| {
            warn!("Rejected graph upload '{}': {}", name, err);
            err
        })?;
        Ok(self.replace(name, graph))
    }

    /// Parses a JSON description and makes the resulting graph active
    pub fn load_json(&mut self, name: &str, bytes: &[u8]) -> Result<&ActiveGraph> {
        let graph = loader::load_json(bytes).map_err(|err| {
            warn!("Rejected graph upload '{}': {}", name, err);
            err
        })?;
        Ok(self.replace(name, graph))
    }

    /// The active graph, or [`Error::NoActiveGraph`] before the first successful load
    pub fn active(&self) -> Result<&ActiveGraph> {
        self.active.as_ref().ok_or(Error::NoActiveGraph)
    }

    /// Answers a query against the active graph
    pub fn solve_and_path(&self, source_id: &str, target_id: &str) -> Result<PathAnswer> {
        solve_and_path(&self.active()?.graph, source_id, target_id)
    }

    /// Makes an already built graph the active one, dropping the previous graph
    pub fn replace(&mut self, name: &str, graph: GraphModel) -> &ActiveGraph {
        let active = ActiveGraph::new(name, graph);
        info!(
            "Active graph is now '{}' ({}): {} nodes, {} edges",
            active.name,
            active.id,
            active.graph.node_count(),
            active.graph.edge_count()
        );
        self.active.insert(active)
    }
}
