// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted preferences for the Wayfind HTTP service.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Config key the service stores its preferences under.
pub const SERVICE_PREFS_KEY: &str = "wayfind_service";

/// Saved preferences for the wayfinding service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicePrefs {
    /// Socket address the HTTP listener binds to.
    pub listen: String,
    /// Where the engine's data comes from.
    pub data: DataPrefs,
    /// Floors offered to the map view.
    pub floors: Vec<FloorPrefs>,
    /// Route search limits.
    pub search: SearchPrefs,
}

impl Default for ServicePrefs {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:5000".into(),
            data: DataPrefs::default(),
            floors: vec![FloorPrefs::numbered(1), FloorPrefs::numbered(2)],
            search: SearchPrefs::default(),
        }
    }
}

/// Data sources for the engine snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPrefs {
    /// Store CSV: supplies the name list, markers and coordinates.
    pub stores_csv: PathBuf,
    /// Extra coordinate CSVs (corridor junctions etc.), applied after the store CSV.
    pub coordinate_csvs: Vec<PathBuf>,
    /// Facility graph JSON; the embedded mall topology is used when unset.
    pub facility_graph: Option<PathBuf>,
}

impl Default for DataPrefs {
    fn default() -> Self {
        Self {
            stores_csv: PathBuf::from("toko.csv"),
            coordinate_csvs: vec![PathBuf::from("jalan.csv")],
            facility_graph: None,
        }
    }
}

/// A rendered floor of the mall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorPrefs {
    /// Label shown to visitors.
    pub name: String,
    /// URL of the floor's background image.
    pub image: String,
    /// Marker overlay key (`floor-<N>`).
    pub key: String,
}

impl FloorPrefs {
    /// Floor `n` with the conventional image path and overlay key.
    pub fn numbered(n: u32) -> Self {
        Self {
            name: format!("Floor {n}"),
            image: format!("/static/images/floor-{n}.png"),
            key: format!("floor-{n}"),
        }
    }
}

/// Route search limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPrefs {
    /// Maximum BFS queue length before a request is answered with "not found".
    pub max_frontier: Option<usize>,
}

impl Default for SearchPrefs {
    fn default() -> Self {
        Self {
            max_frontier: Some(100_000),
        }
    }
}
