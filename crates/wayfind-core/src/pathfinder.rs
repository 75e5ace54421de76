// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Breadth-first route search over the facility graph.
//!
//! The frontier holds whole candidate paths rather than parent pointers, so
//! the first dequeued path ending at the goal is already the answer. Nodes are
//! marked visited when a path ending in them is dequeued; ties between equally
//! short paths resolve in adjacency-list order.
use std::collections::{HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, warn};

use crate::graph::FacilityGraph;
use crate::node::NodeName;

/// A caller-visible route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Stores and junctions in walking order (transition segments removed).
    pub nodes: Vec<NodeName>,
    /// Edges traversed by the raw path, transition segments included.
    pub hops: usize,
}

/// Unweighted shortest-path search bound to one graph.
#[derive(Debug, Clone, Copy)]
pub struct Pathfinder<'g> {
    graph: &'g FacilityGraph,
    frontier_limit: Option<usize>,
}

impl<'g> Pathfinder<'g> {
    /// Creates a search over `graph` with an unbounded frontier.
    pub fn new(graph: &'g FacilityGraph) -> Self {
        Self {
            graph,
            frontier_limit: None,
        }
    }

    /// Aborts a search (as "no route") once the queue holds `limit` paths.
    pub fn with_frontier_limit(mut self, limit: usize) -> Self {
        self.frontier_limit = Some(limit);
        self
    }

    /// Raw shortest path by hop count, transition segments included.
    ///
    /// Unknown endpoints are rejected before the search starts and yield `None`,
    /// exactly like an unreachable goal.
    pub fn shortest_path(&self, start: &str, goal: &str) -> Option<Vec<&'g str>> {
        let Some(start) = self.graph.resolve(start) else {
            debug!(start, "route rejected: unknown start node");
            return None;
        };
        let Some(goal) = self.graph.resolve(goal) else {
            debug!(goal, "route rejected: unknown goal node");
            return None;
        };

        let mut visited: HashSet<&'g str> = HashSet::new();
        let mut queue: VecDeque<Vec<&'g str>> = VecDeque::from([vec![start]]);

        while let Some(path) = queue.pop_front() {
            let Some(&node) = path.last() else {
                continue;
            };
            if node == goal {
                return Some(path);
            }
            if !visited.insert(node) {
                continue;
            }
            for neighbor in self.graph.neighbors(node) {
                let neighbor = neighbor.as_str();
                if visited.contains(neighbor) {
                    continue;
                }
                if let Some(limit) = self.frontier_limit {
                    if queue.len() >= limit {
                        warn!(start, goal, limit, "route search aborted: frontier limit");
                        return None;
                    }
                }
                let mut next = Vec::with_capacity(path.len() + 1);
                next.extend_from_slice(&path);
                next.push(neighbor);
                queue.push_back(next);
            }
        }
        None
    }

    /// Shortest route with transition segments stripped; hop cost is preserved.
    pub fn find_route(&self, start: &str, goal: &str) -> Option<Route> {
        let path = self.shortest_path(start, goal)?;
        let hops = path.len().saturating_sub(1);
        let nodes = strip_transitions(self.graph, &path)
            .into_iter()
            .map(str::to_owned)
            .collect();
        Some(Route { nodes, hops })
    }
}

/// Drops synthetic transition segments, keeping every other node in order.
pub fn strip_transitions<'a>(graph: &FacilityGraph, path: &[&'a str]) -> Vec<&'a str> {
    path.iter()
        .copied()
        .filter(|node| !graph.is_synthetic(node))
        .collect()
}
