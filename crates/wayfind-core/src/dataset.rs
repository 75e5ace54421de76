// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Declarative facility topology (JSON).
//!
//! ```json
//! {
//!   "reciprocity": "symmetrize",
//!   "junctions": ["hall-1"],
//!   "adjacency": { "Aldo": ["hall-1"], "hall-1": ["Aldo"] },
//!   "transitions": [{ "id": "esc", "from": "hall-1", "to": "hall-2", "segments": 5 }]
//! }
//! ```
//!
//! Adjacency keys not listed under `junctions` are stores.
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graph::{FacilityGraph, GraphError, Reciprocity, TransitionSpec};
use crate::node::{NodeKind, NodeName};

/// Mall topology shipped with the crate.
pub const EMBEDDED_FACILITY: &str = include_str!("../data/facility.json");

/// Error loading or building a facility dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Dataset file could not be read.
    #[error("failed to read facility dataset {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Dataset is not valid JSON or does not match the schema.
    #[error("malformed facility dataset: {0}")]
    Parse(#[from] serde_json::Error),
    /// Dataset is well-formed but its topology is inconsistent.
    #[error("invalid facility topology: {0}")]
    Graph(#[from] GraphError),
}

/// Serialized form of the facility graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityDataset {
    /// Treatment of one-directional listings.
    #[serde(default)]
    pub reciprocity: Reciprocity,
    /// Names of corridor junction nodes.
    #[serde(default)]
    pub junctions: Vec<NodeName>,
    /// Neighbour lists keyed by node; list order decides BFS tie-breaks.
    pub adjacency: BTreeMap<NodeName, Vec<NodeName>>,
    /// Stair/escalator chains between floors.
    #[serde(default)]
    pub transitions: Vec<TransitionSpec>,
}

impl FacilityDataset {
    /// Parses the embedded mall topology.
    pub fn embedded() -> Result<Self, DatasetError> {
        Self::from_json(EMBEDDED_FACILITY)
    }

    /// Parses a dataset from JSON text.
    pub fn from_json(text: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a dataset file.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Builds the immutable graph described by this dataset.
    pub fn build_graph(&self) -> Result<FacilityGraph, DatasetError> {
        let junctions: BTreeSet<&str> = self.junctions.iter().map(String::as_str).collect();
        let mut builder = FacilityGraph::builder().reciprocity(self.reciprocity);
        for junction in &self.junctions {
            builder.node(junction.clone(), NodeKind::Junction)?;
        }
        for (node, neighbors) in &self.adjacency {
            if !junctions.contains(node.as_str()) {
                builder.node(node.clone(), NodeKind::Store)?;
            }
            for neighbor in neighbors {
                builder.link(node.clone(), neighbor.clone());
            }
        }
        for spec in &self.transitions {
            builder.transition(spec.clone());
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pathfinder::Pathfinder;

    #[test]
    fn parses_minimal_dataset_with_defaults() {
        let dataset = FacilityDataset::from_json(r#"{"adjacency": {"A": ["B"]}}"#).unwrap();
        assert_eq!(dataset.reciprocity, Reciprocity::Symmetrize);
        let graph = dataset.build_graph().unwrap();
        assert_eq!(graph.neighbors("B"), ["A".to_string()]);
    }

    #[test]
    fn junction_listed_as_store_key_keeps_junction_kind() {
        let dataset = FacilityDataset::from_json(
            r#"{"junctions": ["hub"], "adjacency": {"hub": ["Aldo"], "Aldo": ["hub"]}}"#,
        )
        .unwrap();
        let graph = dataset.build_graph().unwrap();
        assert_eq!(graph.kind("hub"), Some(NodeKind::Junction));
        assert_eq!(graph.kind("Aldo"), Some(NodeKind::Store));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = FacilityDataset::from_json("{ not json").unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn bad_transition_is_graph_error() {
        let dataset = FacilityDataset::from_json(
            r#"{"adjacency": {"A": []},
                "transitions": [{"id": "esc", "from": "A", "to": "B", "segments": 2}]}"#,
        )
        .unwrap();
        let err = dataset.build_graph().unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Graph(GraphError::UnknownTransitionEndpoint { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FacilityDataset::from_path(Path::new("/nonexistent/facility.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn embedded_mall_is_connected_across_floors() {
        let graph = FacilityDataset::embedded().unwrap().build_graph().unwrap();
        assert_eq!(graph.kind("jlmarks"), Some(NodeKind::Junction));
        assert_eq!(graph.kind("transit-west#3"), Some(NodeKind::Transition));

        let route = Pathfinder::new(&graph)
            .find_route("Auto Glaze", "Mothercare")
            .unwrap();
        assert_eq!(route.nodes.first().map(String::as_str), Some("Auto Glaze"));
        assert_eq!(route.nodes.last().map(String::as_str), Some("Mothercare"));
        assert!(route.nodes.iter().all(|n| !n.starts_with("transit-")));
        assert!(route.hops > route.nodes.len() - 1);
    }
}
