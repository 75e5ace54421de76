// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! wayfind-core: indoor wayfinding engine for multi-floor malls.
//!
//! The engine is four read-only structures built once at startup (facility
//! graph, coordinate registry, marker layers, store-name index) plus the
//! [`Wayfinder`] facade that composes them into the two operations exposed to
//! the web boundary: route computation and store search. Everything here is
//! synchronous, in-memory and safe to share across request handlers.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod coords;
mod dataset;
mod graph;
mod handle;
mod markers;
mod names;
mod node;
mod pathfinder;
mod wayfinder;

/// Coordinate rows, per-floor calibration and the name -> placement registry.
pub use coords::{
    Calibration, Coordinate, CoordinateRegistry, CoordinateRow, Placement, CALIBRATED_FLOOR,
    FLOOR_THREE_Y_OFFSET,
};
/// Declarative facility dataset (embedded JSON or a file on disk).
pub use dataset::{DatasetError, FacilityDataset, EMBEDDED_FACILITY};
/// Facility graph and its builder.
pub use graph::{FacilityGraph, GraphBuilder, GraphError, Reciprocity, TransitionSpec};
/// Atomically swappable snapshot of the engine.
pub use handle::WayfinderHandle;
/// Per-floor marker overlays.
pub use markers::{floor_key, Marker, MarkerLayer, MarkerLayers};
/// Case-insensitive prefix autocomplete over store names.
pub use names::NameIndex;
/// Node identity and classification.
pub use node::{NodeKind, NodeName};
/// Breadth-first route search.
pub use pathfinder::{strip_transitions, Pathfinder, Route};
/// Routing facade consumed by the boundary layer.
pub use wayfinder::{RouteOutcome, RoutePlan, RoutePoint, Wayfinder};
