use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::service::ActiveGraph;
use crate::graph::Graph;
use crate::{Error, Result};

/// Query string of the shortest path endpoint
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub starting_node_id: String,
    pub end_node_id: String,
}

impl PathQuery {
    /// Parses a `starting_node_id=..&end_node_id=..` path segment
    pub fn from_path_segment(segment: &str) -> Result<Self> {
        let mut starting_node_id = None;
        let mut end_node_id = None;

        for pair in segment.split('&') {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| Error::InvalidQuery(format!("expected key=value, got '{}'", pair)))?;
            match key {
                "starting_node_id" => starting_node_id = Some(value.to_string()),
                "end_node_id" => end_node_id = Some(value.to_string()),
                _ => return Err(Error::InvalidQuery(format!("unknown parameter '{}'", key))),
            }
        }

        match (starting_node_id, end_node_id) {
            (Some(starting_node_id), Some(end_node_id)) => Ok(Self {
                starting_node_id,
                end_node_id,
            }),
            _ => Err(Error::InvalidQuery(
                "both starting_node_id and end_node_id are required".to_string(),
            )),
        }
    }
}

/// Response to a successful graph upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub upload_success: String,
    #[serde(flatten)]
    pub graph: GraphInfo,
}

/// Summary of the active graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphInfo {
    pub graph_id: Uuid,
    pub name: String,
    pub node_count: usize,
    pub edge_count: usize,
    pub loaded_at: DateTime<Utc>,
}

impl From<&ActiveGraph> for GraphInfo {
    fn from(active: &ActiveGraph) -> Self {
        Self {
            graph_id: active.id,
            name: active.name.clone(),
            node_count: active.graph.node_count(),
            edge_count: active.graph.edge_count(),
            loaded_at: active.loaded_at,
        }
    }
}

impl From<&ActiveGraph> for UploadResponse {
    fn from(active: &ActiveGraph) -> Self {
        Self {
            upload_success: active.name.clone(),
            graph: GraphInfo::from(active),
        }
    }
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
