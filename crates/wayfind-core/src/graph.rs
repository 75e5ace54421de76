// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Facility graph: undirected adjacency over stores, junctions and transition chains.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::node::{NodeKind, NodeName};

/// How one-directional adjacency listings are treated at build time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reciprocity {
    /// Append the missing reverse listing after the declared neighbours.
    #[default]
    Symmetrize,
    /// Keep listings exactly as declared; one-way entries act as shortcuts.
    AsListed,
}

/// Error returned by [`GraphBuilder`] when the declared topology is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A transition names an endpoint that was never declared or linked.
    #[error("transition `{transition}` references unknown node `{node}`")]
    UnknownTransitionEndpoint {
        /// Transition identifier.
        transition: String,
        /// The missing endpoint.
        node: String,
    },
    /// A transition was declared with zero segments.
    #[error("transition `{0}` must have at least one segment")]
    EmptyTransition(String),
    /// A synthetic segment name is already taken by another node.
    #[error("synthetic node `{0}` collides with an existing node")]
    NameCollision(String),
    /// The same node was declared with two different kinds.
    #[error("node `{node}` declared as both {first:?} and {second:?}")]
    ConflictingKind {
        /// Node identifier.
        node: String,
        /// Kind from the first declaration.
        first: NodeKind,
        /// Kind from the conflicting declaration.
        second: NodeKind,
    },
}

/// A stair/escalator between two landings, expanded into a chain of synthetic nodes.
///
/// `segments` synthetic nodes sit between `from` and `to`, so crossing costs
/// `segments + 1` hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// Identifier; segment nodes are named `<id>#<n>`.
    pub id: String,
    /// Landing on one floor.
    pub from: NodeName,
    /// Landing on the other floor.
    pub to: NodeName,
    /// Number of synthetic segment nodes.
    pub segments: u32,
}

impl TransitionSpec {
    /// Name of the `index`-th segment node (1-based).
    pub fn segment_name(&self, index: u32) -> NodeName {
        format!("{}#{index}", self.id)
    }
}

/// Immutable adjacency structure over node names.
///
/// Built once through [`GraphBuilder`] and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct FacilityGraph {
    adjacency: BTreeMap<NodeName, Vec<NodeName>>,
    kinds: BTreeMap<NodeName, NodeKind>,
}

impl FacilityGraph {
    /// Starts an empty builder.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Builds a graph of store nodes from literal adjacency lists, as listed.
    pub fn from_adjacency<I, K, N>(lists: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<N>)>,
        K: Into<NodeName>,
        N: Into<NodeName>,
    {
        let mut builder = GraphBuilder::default().reciprocity(Reciprocity::AsListed);
        for (node, neighbors) in lists {
            let node = node.into();
            builder.ensure(node.clone());
            for neighbor in neighbors {
                builder.link(node.clone(), neighbor);
            }
        }
        builder.assemble()
    }

    /// Directly adjacent nodes in listing order; empty for unknown or isolated nodes.
    pub fn neighbors(&self, node: &str) -> &[NodeName] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    /// Returns `true` if `node` is part of the graph.
    pub fn contains(&self, node: &str) -> bool {
        self.kinds.contains_key(node)
    }

    /// Classification of `node`, if known.
    pub fn kind(&self, node: &str) -> Option<NodeKind> {
        self.kinds.get(node).copied()
    }

    /// Returns `true` if `node` is a synthetic transition segment.
    pub fn is_synthetic(&self, node: &str) -> bool {
        self.kind(node).is_some_and(NodeKind::is_synthetic)
    }

    /// Number of nodes (including synthetic segments).
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Iterate over all nodes in name order.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, NodeKind)> {
        self.kinds.iter().map(|(name, kind)| (name.as_str(), *kind))
    }

    /// Graph-owned copy of a node name, used to borrow for the graph's lifetime.
    pub(crate) fn resolve(&self, node: &str) -> Option<&str> {
        self.kinds.get_key_value(node).map(|(name, _)| name.as_str())
    }
}

/// Accumulates declarations and produces a [`FacilityGraph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    reciprocity: Reciprocity,
    declared: BTreeMap<NodeName, NodeKind>,
    adjacency: BTreeMap<NodeName, Vec<NodeName>>,
    transitions: Vec<TransitionSpec>,
}

impl GraphBuilder {
    /// Sets the reciprocity policy (defaults to [`Reciprocity::Symmetrize`]).
    pub fn reciprocity(mut self, reciprocity: Reciprocity) -> Self {
        self.reciprocity = reciprocity;
        self
    }

    /// Declares `name` with an explicit kind.
    pub fn node(&mut self, name: impl Into<NodeName>, kind: NodeKind) -> Result<(), GraphError> {
        let name = name.into();
        if let Some(first) = self.declared.get(&name) {
            if *first != kind {
                return Err(GraphError::ConflictingKind {
                    node: name,
                    first: *first,
                    second: kind,
                });
            }
            return Ok(());
        }
        self.adjacency.entry(name.clone()).or_default();
        self.declared.insert(name, kind);
        Ok(())
    }

    /// Registers `name` without a kind; undeclared nodes become stores.
    pub fn ensure(&mut self, name: impl Into<NodeName>) {
        self.adjacency.entry(name.into()).or_default();
    }

    /// Lists `to` as a neighbour of `from` (one direction; duplicates ignored).
    pub fn link(&mut self, from: impl Into<NodeName>, to: impl Into<NodeName>) {
        let to = to.into();
        self.ensure(to.clone());
        let list = self.adjacency.entry(from.into()).or_default();
        if !list.contains(&to) {
            list.push(to);
        }
    }

    /// Queues a transition chain; it is expanded by [`GraphBuilder::build`].
    pub fn transition(&mut self, spec: TransitionSpec) {
        self.transitions.push(spec);
    }

    /// Expands transitions, applies the reciprocity policy and freezes the graph.
    pub fn build(mut self) -> Result<FacilityGraph, GraphError> {
        let transitions = std::mem::take(&mut self.transitions);
        for spec in &transitions {
            self.expand(spec)?;
        }
        if self.reciprocity == Reciprocity::Symmetrize {
            self.symmetrize();
        }
        let graph = self.assemble();
        info!(
            nodes = graph.len(),
            transitions = transitions.len(),
            "facility graph built"
        );
        Ok(graph)
    }

    fn expand(&mut self, spec: &TransitionSpec) -> Result<(), GraphError> {
        if spec.segments == 0 {
            return Err(GraphError::EmptyTransition(spec.id.clone()));
        }
        for endpoint in [&spec.from, &spec.to] {
            if !self.adjacency.contains_key(endpoint) {
                return Err(GraphError::UnknownTransitionEndpoint {
                    transition: spec.id.clone(),
                    node: endpoint.clone(),
                });
            }
        }
        let segments: Vec<NodeName> = (1..=spec.segments)
            .map(|index| spec.segment_name(index))
            .collect();
        if let Some(taken) = segments.iter().find(|s| self.adjacency.contains_key(*s)) {
            return Err(GraphError::NameCollision(taken.clone()));
        }
        for segment in &segments {
            self.node(segment.clone(), NodeKind::Transition)?;
        }

        let mut prev = spec.from.clone();
        for next in segments.iter().chain(std::iter::once(&spec.to)) {
            self.link(prev.clone(), next.clone());
            self.link(next.clone(), prev.clone());
            prev = next.clone();
        }
        Ok(())
    }

    fn symmetrize(&mut self) {
        let mut missing: Vec<(NodeName, NodeName)> = Vec::new();
        for (node, neighbors) in &self.adjacency {
            for neighbor in neighbors {
                let lists_back = self
                    .adjacency
                    .get(neighbor)
                    .is_some_and(|back| back.contains(node));
                if !lists_back {
                    missing.push((neighbor.clone(), node.clone()));
                }
            }
        }
        for (from, to) in missing {
            debug!(from = %from, to = %to, "adding missing reverse listing");
            self.link(from, to);
        }
    }

    fn assemble(self) -> FacilityGraph {
        let mut kinds = self.declared;
        for name in self.adjacency.keys() {
            kinds.entry(name.clone()).or_insert(NodeKind::Store);
        }
        FacilityGraph {
            adjacency: self.adjacency,
            kinds,
        }
    }
}
