//! Path reconstruction from a solver's predecessor links

use std::fmt::Debug;
use log::error;
use num_traits::Float;
use serde::Serialize;

use crate::algorithm::ShortestPathResult;
use crate::graph::{Graph, GraphModel, Weight};
use crate::{Error, Result};

/// An explicit route from the solve's source to a target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    /// Node identifiers from source to target, both inclusive
    pub nodes: Vec<String>,
    pub total_distance: f64,
}

/// Walks predecessor links back from `target` and returns the vertices in
/// source-to-target order, or `None` if `target` was not reached
///
/// A chain that revisits a vertex, runs longer than the vertex count, or ends
/// anywhere but the source means the result is corrupt and is reported as
/// [`Error::PathInconsistency`].
pub fn reconstruct<W>(result: &ShortestPathResult<W>, target: usize) -> Result<Option<Vec<usize>>>
where
    W: Float + Debug + Copy,
{
    let n = result.vertex_count();
    let distance = result
        .distance(target)
        .ok_or_else(|| Error::NodeNotFound(format!("vertex {}", target)))?;
    if distance.is_infinite() {
        return Ok(None);
    }

    let mut path = Vec::new();
    let mut visited = vec![false; n];
    let mut current = target;

    loop {
        if visited[current] || path.len() >= n {
            return Err(inconsistency(format!(
                "predecessor chain from vertex {} revisits vertex {}",
                target, current
            )));
        }
        visited[current] = true;
        path.push(current);

        match result.predecessors.get(current).copied().flatten() {
            Some(pred) if pred < n => current = pred,
            Some(pred) => {
                return Err(inconsistency(format!(
                    "vertex {} has out-of-range predecessor {}",
                    current, pred
                )));
            }
            None if current == result.source => break,
            None => {
                return Err(inconsistency(format!(
                    "predecessor chain from vertex {} stops at {} instead of source {}",
                    target, current, result.source
                )));
            }
        }
    }

    path.reverse();
    Ok(Some(path))
}

/// Resolves the shortest path to `target_id` in `graph` from a prior solve
///
/// Returns `Ok(None)` when the target is unreachable from the solve's source.
pub fn path_to(
    graph: &GraphModel,
    result: &ShortestPathResult<Weight>,
    target_id: &str,
) -> Result<Option<ShortestPath>> {
    if result.vertex_count() != graph.node_count() {
        return Err(inconsistency(format!(
            "result covers {} vertices but the graph has {}",
            result.vertex_count(),
            graph.node_count()
        )));
    }

    let target = graph
        .index_of(target_id)
        .ok_or_else(|| Error::NodeNotFound(target_id.to_string()))?;

    let vertices = match reconstruct(result, target)? {
        Some(vertices) => vertices,
        None => return Ok(None),
    };

    let nodes = vertices
        .into_iter()
        .map(|v| graph.node_id(v).map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| inconsistency("path references a vertex outside the graph".to_string()))?;

    Ok(Some(ShortestPath {
        nodes,
        total_distance: result.distances[target].into_inner(),
    }))
}

fn inconsistency(message: String) -> Error {
    error!("Path reconstruction failed: {}", message);
    Error::PathInconsistency(message)
}
