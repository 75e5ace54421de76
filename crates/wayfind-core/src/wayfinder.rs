// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Routing facade: the two operations the web boundary consumes.
use serde::Serialize;

use crate::coords::{Coordinate, CoordinateRegistry};
use crate::graph::FacilityGraph;
use crate::markers::MarkerLayers;
use crate::names::NameIndex;
use crate::node::NodeName;
use crate::pathfinder::Pathfinder;

/// A route node projected onto its floor image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePoint {
    /// Node name.
    pub name: NodeName,
    /// Calibrated pixel position.
    pub coord: Coordinate,
    /// Floor identifier.
    pub floor: String,
}

/// A renderable route.
///
/// `route` and `coordinates` are aligned 1:1; nodes without a registered
/// coordinate are absent from both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    /// Node names in walking order.
    pub route: Vec<NodeName>,
    /// Positions for each entry of `route`.
    pub coordinates: Vec<RoutePoint>,
    /// Edges walked by the raw search path.
    pub hops: usize,
}

/// Result of [`Wayfinder::compute_route`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// A route exists.
    Found(RoutePlan),
    /// No route: unknown endpoint, unreachable goal or aborted search.
    NotFound,
}

impl RouteOutcome {
    /// The plan, if a route was found.
    pub fn found(self) -> Option<RoutePlan> {
        match self {
            Self::Found(plan) => Some(plan),
            Self::NotFound => None,
        }
    }

    /// Returns `true` for [`RouteOutcome::Found`].
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Immutable engine snapshot composing graph, coordinates, markers and names.
#[derive(Debug, Clone)]
pub struct Wayfinder {
    graph: FacilityGraph,
    coords: CoordinateRegistry,
    names: NameIndex,
    markers: MarkerLayers,
    frontier_limit: Option<usize>,
}

impl Wayfinder {
    /// Assembles a snapshot from already-built parts.
    pub fn new(
        graph: FacilityGraph,
        coords: CoordinateRegistry,
        names: NameIndex,
        markers: MarkerLayers,
    ) -> Self {
        Self {
            graph,
            coords,
            names,
            markers,
            frontier_limit: None,
        }
    }

    /// Bounds the BFS queue for every route request.
    pub fn with_frontier_limit(mut self, limit: Option<usize>) -> Self {
        self.frontier_limit = limit;
        self
    }

    /// Shortest route from `start` to `goal`, projected to map coordinates.
    pub fn compute_route(&self, start: &str, goal: &str) -> RouteOutcome {
        let mut finder = Pathfinder::new(&self.graph);
        if let Some(limit) = self.frontier_limit {
            finder = finder.with_frontier_limit(limit);
        }
        let Some(found) = finder.find_route(start, goal) else {
            return RouteOutcome::NotFound;
        };

        let mut route = Vec::with_capacity(found.nodes.len());
        let mut coordinates = Vec::with_capacity(found.nodes.len());
        for name in found.nodes {
            let Some(placement) = self.coords.coordinate_of(&name) else {
                continue;
            };
            coordinates.push(RoutePoint {
                name: name.clone(),
                coord: placement.coord,
                floor: placement.floor.clone(),
            });
            route.push(name);
        }
        RouteOutcome::Found(RoutePlan {
            route,
            coordinates,
            hops: found.hops,
        })
    }

    /// Store names matching `query` as a case-insensitive prefix.
    pub fn search_stores(&self, query: &str) -> Vec<&str> {
        self.names.search_prefix(query)
    }

    /// Per-floor marker overlays.
    pub fn markers(&self) -> &MarkerLayers {
        &self.markers
    }

    /// The facility graph.
    pub fn graph(&self) -> &FacilityGraph {
        &self.graph
    }

    /// The coordinate registry.
    pub fn coordinates(&self) -> &CoordinateRegistry {
        &self.coords
    }

    /// The store-name index.
    pub fn names(&self) -> &NameIndex {
        &self.names
    }
}
