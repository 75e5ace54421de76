// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Building and republishing engine snapshots from the configured sources.

use anyhow::{Context, Result};
use tracing::{info, warn};
use wayfind_app_core::prefs::ServicePrefs;
use wayfind_core::{FacilityDataset, Wayfinder};
use wayfind_ingest::Ingested;

use crate::routes::AppState;

/// Reads every source named in `prefs` and assembles a fresh snapshot.
pub fn build(prefs: &ServicePrefs) -> Result<Wayfinder> {
    let dataset = match &prefs.data.facility_graph {
        Some(path) => FacilityDataset::from_path(path)?,
        None => FacilityDataset::embedded().context("embedded facility dataset")?,
    };
    let graph = dataset.build_graph()?;
    let ingested = Ingested::from_files(&prefs.data.stores_csv, &prefs.data.coordinate_csvs)
        .context("read tabular sources")?;
    let wayfinder = ingested
        .assemble(graph)
        .with_frontier_limit(prefs.search.max_frontier);
    info!(
        nodes = wayfinder.graph().len(),
        stores = wayfinder.names().len(),
        coordinates = wayfinder.coordinates().len(),
        floors = wayfinder.markers().len(),
        "engine snapshot ready"
    );
    Ok(wayfinder)
}

/// Rebuilds and publishes; a failed rebuild leaves the current snapshot serving.
pub fn reload(state: &AppState) -> bool {
    match build(&state.prefs) {
        Ok(next) => {
            state.handle.publish(next);
            info!("engine snapshot reloaded");
            true
        }
        Err(err) => {
            warn!("reload failed, keeping current snapshot: {err:#}");
            false
        }
    }
}
