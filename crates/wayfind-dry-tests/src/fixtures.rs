// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A three-floor toy mall with hand-checkable routes.
//!
//! ```text
//! floor 1:  Aldo ─┐             Kiosk (isolated)
//!                 hall-1 ── esc-12#1 ── esc-12#2 ──┐
//!          Pedro ─┘                                │
//! floor 2:            Lugua ─┐                     │
//!                            hall-2 ───────────────┘
//!                Mothercare ─┘  └── esc-23#1 ── esc-23#2 ──┐
//! floor 3:                                       ZAP ── hall-3
//! ```
//!
//! Every store and junction has a coordinate; escalator segments have none.
//! `ZAP` and `hall-3` sit on the calibrated floor, so their registry `y` is
//! 25 pixels above the sheet value.

use std::collections::BTreeMap;

use wayfind_core::{
    CoordinateRegistry, CoordinateRow, DatasetError, FacilityDataset, FacilityGraph,
    MarkerLayers, NameIndex, Reciprocity, TransitionSpec, Wayfinder,
};

/// Store sheet for the toy mall, in the service's CSV layout.
pub const SAMPLE_STORES_CSV: &str = "\
lantai,toko,x,y
1,Aldo,10,10
1,Pedro,30,10
1,Kiosk,5,5
2,Lugua,10,10
2,Mothercare,40,15
3,ZAP,100,200
";

/// Junction sheet for the toy mall.
pub const SAMPLE_JUNCTIONS_CSV: &str = "\
lantai,toko,x,y
1,hall-1,20,20
2,hall-2,20,20
3,hall-3,60,80
";

/// `A - B - C` with declared listings only, all nodes stores.
pub fn line_graph() -> FacilityGraph {
    FacilityGraph::from_adjacency([
        ("A", vec!["B"]),
        ("B", vec!["A", "C"]),
        ("C", vec!["B"]),
    ])
}

fn escalator(id: &str, from: &str, to: &str) -> TransitionSpec {
    TransitionSpec {
        id: id.into(),
        from: from.into(),
        to: to.into(),
        segments: 2,
    }
}

/// Declarative form of the toy mall. Reverse listings are left to the builder.
pub fn sample_dataset() -> FacilityDataset {
    let adjacency: BTreeMap<String, Vec<String>> = [
        ("Aldo", vec!["hall-1"]),
        ("Pedro", vec!["hall-1"]),
        ("Kiosk", vec![]),
        ("Lugua", vec!["hall-2"]),
        ("Mothercare", vec!["hall-2"]),
        ("ZAP", vec!["hall-3"]),
        ("hall-1", vec![]),
        ("hall-2", vec![]),
        ("hall-3", vec![]),
    ]
    .into_iter()
    .map(|(node, neighbors)| {
        (
            node.to_owned(),
            neighbors.into_iter().map(str::to_owned).collect(),
        )
    })
    .collect();

    FacilityDataset {
        reciprocity: Reciprocity::Symmetrize,
        junctions: vec!["hall-1".into(), "hall-2".into(), "hall-3".into()],
        adjacency,
        transitions: vec![
            escalator("esc-12", "hall-1", "hall-2"),
            escalator("esc-23", "hall-2", "hall-3"),
        ],
    }
}

/// The toy mall's facility graph.
pub fn sample_graph() -> Result<FacilityGraph, DatasetError> {
    sample_dataset().build_graph()
}

/// Rows of both sample sheets, store sheet first.
pub fn sample_coordinate_rows() -> Vec<CoordinateRow> {
    vec![
        CoordinateRow::new("1", "Aldo", 10, 10),
        CoordinateRow::new("1", "Pedro", 30, 10),
        CoordinateRow::new("1", "Kiosk", 5, 5),
        CoordinateRow::new("2", "Lugua", 10, 10),
        CoordinateRow::new("2", "Mothercare", 40, 15),
        CoordinateRow::new("3", "ZAP", 100, 200),
        CoordinateRow::new("1", "hall-1", 20, 20),
        CoordinateRow::new("2", "hall-2", 20, 20),
        CoordinateRow::new("3", "hall-3", 60, 80),
    ]
}

/// Store names as listed on the store sheet.
pub fn sample_store_names() -> Vec<&'static str> {
    vec!["Aldo", "Pedro", "Kiosk", "Lugua", "Mothercare", "ZAP"]
}

/// A complete engine snapshot over the toy mall.
pub fn sample_wayfinder() -> Result<Wayfinder, DatasetError> {
    let rows = sample_coordinate_rows();
    let store_rows: Vec<CoordinateRow> = rows
        .iter()
        .filter(|row| !row.name.starts_with("hall-"))
        .cloned()
        .collect();
    Ok(Wayfinder::new(
        sample_graph()?,
        CoordinateRegistry::from_rows(rows),
        NameIndex::new(sample_store_names()),
        MarkerLayers::from_rows(store_rows),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_non_escalator_node_has_a_coordinate() {
        let graph = sample_graph().unwrap();
        let coords = CoordinateRegistry::from_rows(sample_coordinate_rows());
        for (name, kind) in graph.nodes() {
            assert_eq!(
                coords.coordinate_of(name).is_some(),
                !kind.is_synthetic(),
                "{name}"
            );
        }
    }

    #[test]
    fn store_sheet_matches_store_names() {
        let names: Vec<&str> = SAMPLE_STORES_CSV
            .lines()
            .skip(1)
            .filter_map(|line| line.split(',').nth(1))
            .collect();
        assert_eq!(names, sample_store_names());
    }
}
