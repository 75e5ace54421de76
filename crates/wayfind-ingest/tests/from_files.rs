// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::panic)]

use std::fs;
use std::path::PathBuf;

use wayfind_core::{floor_key, CoordinateRow};
use wayfind_dry_tests::{sample_graph, SAMPLE_JUNCTIONS_CSV, SAMPLE_STORES_CSV};
use wayfind_ingest::{IngestError, Ingested};

fn write_sheets(dir: &tempfile::TempDir) -> (PathBuf, PathBuf) {
    let stores = dir.path().join("toko.csv");
    let junctions = dir.path().join("jalan.csv");
    fs::write(&stores, SAMPLE_STORES_CSV).unwrap();
    fs::write(&junctions, SAMPLE_JUNCTIONS_CSV).unwrap();
    (stores, junctions)
}

#[test]
fn store_sheet_feeds_names_and_markers() {
    let dir = tempfile::tempdir().unwrap();
    let (stores, junctions) = write_sheets(&dir);
    let ingested = Ingested::from_files(&stores, &[junctions]).unwrap();

    assert_eq!(
        ingested.store_names,
        ["Aldo", "Pedro", "Kiosk", "Lugua", "Mothercare", "ZAP"]
    );
    assert_eq!(ingested.store_rows.len(), 6);
    assert_eq!(ingested.coordinate_rows.len(), 9);
    assert_eq!(
        ingested.coordinate_rows.last(),
        Some(&CoordinateRow::new("3", "hall-3", 60, 80))
    );
}

#[test]
fn assembled_snapshot_routes_and_draws() {
    let dir = tempfile::tempdir().unwrap();
    let (stores, junctions) = write_sheets(&dir);
    let wayfinder = Ingested::from_files(&stores, &[junctions])
        .unwrap()
        .assemble(sample_graph().unwrap());

    let plan = wayfinder.compute_route("Mothercare", "ZAP").found().unwrap();
    assert_eq!(plan.route, ["Mothercare", "hall-2", "hall-3", "ZAP"]);
    assert_eq!(plan.coordinates[3].coord.y, 175);

    // markers keep raw positions and never include junctions
    let floor_three = wayfinder.markers().get(&floor_key("3")).unwrap();
    assert_eq!(floor_three.len(), 1);
    assert_eq!((floor_three[0].x, floor_three[0].y), (100, 200));
}

#[test]
fn english_store_sheet_in_any_column_order() {
    let dir = tempfile::tempdir().unwrap();
    let stores = dir.path().join("stores.csv");
    fs::write(&stores, "name,x,y,floor\nPedro,1,2,2\nAldo,3,4,1\n").unwrap();

    let ingested = Ingested::from_files(&stores, &[]).unwrap();
    assert_eq!(ingested.store_names, ["Pedro", "Aldo"]);

    let wayfinder = ingested.assemble(sample_graph().unwrap());
    assert_eq!(wayfinder.search_stores("p"), ["Pedro"]);
    assert_eq!(wayfinder.markers().get(&floor_key("1")).unwrap()[0].name, "Aldo");
}

#[test]
fn later_sheet_overrides_earlier_coordinate() {
    let dir = tempfile::tempdir().unwrap();
    let (stores, _) = write_sheets(&dir);
    let patch = dir.path().join("patch.csv");
    fs::write(&patch, "floor,name,x,y\n1,Aldo,11,12\n").unwrap();

    let wayfinder = Ingested::from_files(&stores, &[patch])
        .unwrap()
        .assemble(sample_graph().unwrap());
    let aldo = wayfinder.coordinates().coordinate_of("Aldo").unwrap();
    assert_eq!((aldo.coord.x, aldo.coord.y), (11, 12));
}

#[test]
fn missing_file_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let (stores, _) = write_sheets(&dir);
    let missing = dir.path().join("missing.csv");

    let err = Ingested::from_files(&stores, &[missing.clone()]).unwrap_err();
    assert!(matches!(&err, IngestError::Io { path, .. } if *path == missing));
}

#[test]
fn header_problem_names_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let (stores, _) = write_sheets(&dir);
    let broken = dir.path().join("broken.csv");
    fs::write(&broken, "lantai,toko\n1,Aldo\n").unwrap();

    let err = Ingested::from_files(&stores, &[broken.clone()]).unwrap_err();
    match err {
        IngestError::InFile { path, source } => {
            assert_eq!(path, broken);
            assert!(matches!(*source, IngestError::MissingColumn("x")));
        }
        other => panic!("expected a file-scoped error, got {other:?}"),
    }
}
