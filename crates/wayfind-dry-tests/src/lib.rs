// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for Wayfind crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`fixtures`] - Small malls (graph, coordinates, names, CSV text) with known routes

pub mod config;
pub mod fixtures;

pub use config::InMemoryConfigStore;
pub use fixtures::{
    line_graph, sample_coordinate_rows, sample_dataset, sample_graph, sample_store_names,
    sample_wayfinder, SAMPLE_JUNCTIONS_CSV, SAMPLE_STORES_CSV,
};
