// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-floor marker overlays for the map view.
//!
//! Markers come from the store source only and keep their raw (uncalibrated)
//! positions; the overlay is drawn in the floor image's own pixel space.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::coords::CoordinateRow;

/// A store pin on a floor image.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Marker {
    /// Store display name.
    pub name: String,
    /// Horizontal pixel position.
    pub x: i32,
    /// Vertical pixel position.
    pub y: i32,
}

/// Markers of a single floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerLayer {
    /// Overlay key, `floor-<floor>`.
    pub key: String,
    /// Floor identifier (trimmed).
    pub floor: String,
    /// Markers in source row order.
    pub markers: Vec<Marker>,
}

/// Overlay key for `floor`.
pub fn floor_key(floor: &str) -> String {
    format!("floor-{}", floor.trim())
}

/// All floors' marker layers, numeric floors first in ascending order.
///
/// Serializes as a map `{"floor-1": [...], "floor-2": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerLayers {
    layers: Vec<MarkerLayer>,
}

impl MarkerLayers {
    /// Groups rows by floor, preserving row order within each floor.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = CoordinateRow>,
    {
        let mut layers: Vec<MarkerLayer> = Vec::new();
        for row in rows {
            let floor = row.floor.trim();
            let marker = Marker {
                name: row.name,
                x: row.x,
                y: row.y,
            };
            match layers.iter_mut().find(|layer| layer.floor == floor) {
                Some(layer) => layer.markers.push(marker),
                None => layers.push(MarkerLayer {
                    key: floor_key(floor),
                    floor: floor.to_owned(),
                    markers: vec![marker],
                }),
            }
        }
        layers.sort_by(|a, b| {
            let order = |layer: &MarkerLayer| layer.floor.parse::<i64>().map_or((1, 0), |n| (0, n));
            order(a).cmp(&order(b)).then_with(|| a.floor.cmp(&b.floor))
        });
        Self { layers }
    }

    /// Markers for the overlay `key` (e.g. `floor-2`).
    pub fn get(&self, key: &str) -> Option<&[Marker]> {
        self.layers
            .iter()
            .find(|layer| layer.key == key)
            .map(|layer| layer.markers.as_slice())
    }

    /// Iterate over layers in floor order.
    pub fn iter(&self) -> impl Iterator<Item = &MarkerLayer> {
        self.layers.iter()
    }

    /// Number of floors with at least one marker.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if there are no markers at all.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl Serialize for MarkerLayers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.layers.len()))?;
        for layer in &self.layers {
            map.serialize_entry(&layer.key, &layer.markers)?;
        }
        map.end()
    }
}
