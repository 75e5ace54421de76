// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Coordinate registry: node name -> pixel position and floor.
use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Floor whose background image is rendered with a vertical offset.
pub const CALIBRATED_FLOOR: &str = "3";
/// Vertical correction applied to every coordinate on [`CALIBRATED_FLOOR`].
pub const FLOOR_THREE_Y_OFFSET: i32 = -25;

/// One ingested `(floor, name, x, y)` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateRow {
    /// Floor identifier as written in the source (e.g. `"1"`).
    pub floor: String,
    /// Store or node name.
    pub name: String,
    /// Horizontal pixel position on the floor image.
    pub x: i32,
    /// Vertical pixel position on the floor image.
    pub y: i32,
}

impl CoordinateRow {
    /// Convenience constructor.
    pub fn new(floor: impl Into<String>, name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            floor: floor.into(),
            name: name.into(),
            x,
            y,
        }
    }
}

/// Pixel position on a floor image. Serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coordinate {
    /// Horizontal pixel position.
    pub x: i32,
    /// Vertical pixel position.
    pub y: i32,
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for (i32, i32) {
    fn from(c: Coordinate) -> Self {
        (c.x, c.y)
    }
}

/// Registered position of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Calibrated pixel position.
    pub coord: Coordinate,
    /// Floor identifier (trimmed).
    pub floor: String,
}

/// Per-floor vertical offsets applied once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calibration {
    offsets: BTreeMap<String, i32>,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::none().with_offset(CALIBRATED_FLOOR, FLOOR_THREE_Y_OFFSET)
    }
}

impl Calibration {
    /// No correction on any floor.
    pub fn none() -> Self {
        Self {
            offsets: BTreeMap::new(),
        }
    }

    /// Adds (or replaces) the vertical offset for `floor`.
    pub fn with_offset(mut self, floor: impl Into<String>, dy: i32) -> Self {
        self.offsets.insert(floor.into(), dy);
        self
    }

    /// Applies the floor's offset to `coord`.
    pub fn apply(&self, floor: &str, coord: Coordinate) -> Coordinate {
        let dy = self.offsets.get(floor).copied().unwrap_or(0);
        Coordinate {
            x: coord.x,
            y: coord.y.saturating_add(dy),
        }
    }
}

/// Name -> placement mapping merged from every coordinate source.
///
/// Serializes as `{"<name>": {"coord": [x, y], "floor": ".."}, ...}` in name order,
/// which the map page uses to validate endpoints and pick the floor to show.
#[derive(Debug, Clone, Default)]
pub struct CoordinateRegistry {
    entries: BTreeMap<String, Placement>,
}

impl CoordinateRegistry {
    /// Builds the registry with the standard floor calibration.
    ///
    /// Rows are merged by name; a later row replaces an earlier one.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = CoordinateRow>,
    {
        Self::with_calibration(rows, &Calibration::default())
    }

    /// Builds the registry with an explicit calibration table.
    pub fn with_calibration<I>(rows: I, calibration: &Calibration) -> Self
    where
        I: IntoIterator<Item = CoordinateRow>,
    {
        let mut entries = BTreeMap::new();
        for row in rows {
            let floor = row.floor.trim().to_owned();
            let coord = calibration.apply(&floor, Coordinate { x: row.x, y: row.y });
            entries.insert(row.name, Placement { coord, floor });
        }
        Self { entries }
    }

    /// Position and floor of `name`, if any source listed it.
    pub fn coordinate_of(&self, name: &str) -> Option<&Placement> {
        self.entries.get(name)
    }

    /// Registered names and their placements, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Placement)> {
        self.entries
            .iter()
            .map(|(name, placement)| (name.as_str(), placement))
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CoordinateRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, placement) in &self.entries {
            map.serialize_entry(name, placement)?;
        }
        map.end()
    }
}
