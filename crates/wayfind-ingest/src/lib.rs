// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CSV ingestion for the wayfinding engine.
//!
//! Sources are the mall's tabular exports: a store sheet (`lantai,toko,x,y`)
//! that feeds the name list, the marker overlays and the coordinate registry,
//! plus any number of extra coordinate sheets (corridor junctions) merged
//! after it. English headers (`floor,name,x,y`) are accepted as well.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::{info, warn};
use wayfind_core::{
    CoordinateRegistry, CoordinateRow, FacilityGraph, MarkerLayers, NameIndex, Wayfinder,
};

const FLOOR_HEADERS: &[&str] = &["lantai", "floor"];
const NAME_HEADERS: &[&str] = &["toko", "name", "store"];

/// Error reading a tabular source.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Io {
        /// Source path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The CSV stream itself is malformed.
    #[error("malformed csv: {0}")]
    Csv(#[from] csv::Error),
    /// A required column is missing from the header row.
    #[error("missing column `{0}`")]
    MissingColumn(&'static str),
    /// Context wrapper naming the file an error came from.
    #[error("{path}: {source}")]
    InFile {
        /// Source path.
        path: PathBuf,
        /// The error raised while reading it.
        #[source]
        source: Box<IngestError>,
    },
}

struct Columns {
    floor: usize,
    name: usize,
    x: usize,
    y: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self, IngestError> {
        Ok(Self {
            floor: position(headers, FLOOR_HEADERS, "lantai")?,
            name: position(headers, NAME_HEADERS, "toko")?,
            x: position(headers, &["x"], "x")?,
            y: position(headers, &["y"], "y")?,
        })
    }
}

fn position(
    headers: &StringRecord,
    aliases: &[&str],
    column: &'static str,
) -> Result<usize, IngestError> {
    headers
        .iter()
        .position(|h| aliases.iter().any(|a| h.eq_ignore_ascii_case(a)))
        .ok_or(IngestError::MissingColumn(column))
}

/// Parses an integer cell; integral floats such as `"120.0"` are truncated.
#[allow(clippy::cast_possible_truncation)]
fn parse_pixel(cell: &str) -> Option<i32> {
    if let Ok(value) = cell.parse::<i32>() {
        return Some(value);
    }
    let value = cell.parse::<f64>().ok()?;
    if !value.is_finite() || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value.trunc() as i32)
}

fn reader<R: Read>(source: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source)
}

/// Reads `(floor, name, x, y)` rows. Rows with a blank name or a
/// non-numeric position are skipped with a warning.
pub fn read_coordinate_rows<R: Read>(source: R) -> Result<Vec<CoordinateRow>, IngestError> {
    let mut rdr = reader(source);
    let columns = Columns::locate(rdr.headers()?)?;
    let mut rows = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        let cell = |i: usize| record.get(i).unwrap_or_default();
        let name = cell(columns.name);
        let (Some(x), Some(y)) = (parse_pixel(cell(columns.x)), parse_pixel(cell(columns.y)))
        else {
            warn!(row = idx + 1, name, "skipping row: bad coordinate");
            continue;
        };
        if name.is_empty() {
            warn!(row = idx + 1, "skipping row: blank name");
            continue;
        }
        rows.push(CoordinateRow::new(cell(columns.floor), name, x, y));
    }
    Ok(rows)
}

/// Reads the store display names from the sheet's name column (`toko` or `name`).
pub fn read_store_names<R: Read>(source: R) -> Result<Vec<String>, IngestError> {
    let mut rdr = reader(source);
    let column = position(rdr.headers()?, NAME_HEADERS, "toko")?;
    let mut names = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record?;
        match record.get(column).filter(|name| !name.is_empty()) {
            Some(name) => names.push(name.to_owned()),
            None => warn!(row = idx + 1, "skipping row: no store name"),
        }
    }
    Ok(names)
}

fn open(path: &Path) -> Result<File, IngestError> {
    File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn in_file(path: &Path) -> impl FnOnce(IngestError) -> IngestError + '_ {
    move |source| match source {
        err @ IngestError::Io { .. } => err,
        source => IngestError::InFile {
            path: path.to_path_buf(),
            source: Box::new(source),
        },
    }
}

/// Everything the engine needs from the tabular sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ingested {
    /// Rows of the store sheet (marker overlays).
    pub store_rows: Vec<CoordinateRow>,
    /// Rows of every sheet in merge order (coordinate registry).
    pub coordinate_rows: Vec<CoordinateRow>,
    /// Store display names from the store sheet.
    pub store_names: Vec<String>,
}

impl Ingested {
    /// Reads the store sheet, then each extra coordinate sheet in order.
    pub fn from_files(stores_csv: &Path, coordinate_csvs: &[PathBuf]) -> Result<Self, IngestError> {
        let store_rows = read_coordinate_rows(open(stores_csv)?).map_err(in_file(stores_csv))?;
        let store_names = read_store_names(open(stores_csv)?).map_err(in_file(stores_csv))?;

        let mut coordinate_rows = store_rows.clone();
        for path in coordinate_csvs {
            let rows = read_coordinate_rows(open(path)?).map_err(in_file(path))?;
            coordinate_rows.extend(rows);
        }
        info!(
            stores = store_names.len(),
            coordinates = coordinate_rows.len(),
            sources = coordinate_csvs.len() + 1,
            "tabular sources ingested"
        );
        Ok(Self {
            store_rows,
            coordinate_rows,
            store_names,
        })
    }

    /// Builds an engine snapshot around `graph`.
    pub fn assemble(self, graph: FacilityGraph) -> Wayfinder {
        Wayfinder::new(
            graph,
            CoordinateRegistry::from_rows(self.coordinate_rows),
            NameIndex::new(self.store_names),
            MarkerLayers::from_rows(self.store_rows),
        )
    }
}
