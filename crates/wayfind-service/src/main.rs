// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! HTTP front door for the wayfinding engine.
//! The map page asks for store suggestions, routes and floor overlays; the
//! engine snapshot is rebuilt from its sources on SIGHUP.

use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wayfind_app_core::config::ConfigService;
use wayfind_app_core::prefs::{ServicePrefs, SERVICE_PREFS_KEY};
use wayfind_config_fs::FsConfigStore;
use wayfind_core::WayfinderHandle;

mod routes;
mod snapshot;

use routes::AppState;

#[derive(Parser, Debug)]
#[command(author, version, about = "Wayfind mall routing service")]
struct Args {
    /// TCP listener for the map page; overrides the saved preference.
    #[arg(long)]
    listen: Option<SocketAddr>,
    /// Directory holding `wayfind_service.json`; defaults to the platform config dir.
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

fn load_prefs(config_dir: Option<&Path>) -> ServicePrefs {
    let store = match config_dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    };
    match store {
        Ok(store) => {
            info!(dir = %store.base().display(), "loading service prefs");
            ConfigService::new(store).load_or_init(SERVICE_PREFS_KEY)
        }
        Err(err) => {
            warn!(%err, "config store unavailable, using default prefs");
            ServicePrefs::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let prefs = load_prefs(args.config_dir.as_deref());
    let listen = match args.listen {
        Some(addr) => addr,
        None => prefs
            .listen
            .parse()
            .with_context(|| format!("invalid listen address `{}`", prefs.listen))?,
    };

    let wayfinder = snapshot::build(&prefs).context("build initial engine snapshot")?;
    let state = Arc::new(AppState {
        handle: WayfinderHandle::new(wayfinder),
        prefs,
    });

    #[cfg(unix)]
    tokio::spawn(reload_on_hangup(Arc::clone(&state)));

    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("bind {listen}"))?;
    info!("wayfind service listening on {listen}");
    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

#[cfg(unix)]
async fn reload_on_hangup(state: Arc<AppState>) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangups = match signal(SignalKind::hangup()) {
        Ok(stream) => stream,
        Err(err) => {
            warn!(%err, "SIGHUP reload disabled");
            return;
        }
    };
    while hangups.recv().await.is_some() {
        snapshot::reload(&state);
    }
}
