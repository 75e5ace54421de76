// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! JSON endpoints consumed by the map page.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;
use wayfind_app_core::prefs::{FloorPrefs, ServicePrefs};
use wayfind_core::{CoordinateRegistry, MarkerLayers, RouteOutcome, RoutePlan, WayfinderHandle};

/// Shared by every handler.
pub struct AppState {
    pub handle: WayfinderHandle,
    pub prefs: ServicePrefs,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/search", post(search))
        .route("/route", get(route))
        .route("/markers", get(markers))
        .route("/coordinates", get(coordinates))
        .route("/floors", get(floors))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Suggestions keyed the way the map page reads them.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(rename = "list_toko")]
    stores: Vec<String>,
}

/// `POST /search {"query": ".."}`. Anything but a JSON object with a string
/// `query` gets an empty suggestion list.
async fn search(State(state): State<Arc<AppState>>, body: Bytes) -> Json<SearchResponse> {
    let query = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|body| body.get("query").and_then(Value::as_str).map(str::to_owned));
    let Some(query) = query else {
        debug!("search without a string query");
        return Json(SearchResponse { stores: Vec::new() });
    };
    let snapshot = state.handle.current();
    let stores = snapshot
        .search_stores(&query)
        .into_iter()
        .map(str::to_owned)
        .collect();
    Json(SearchResponse { stores })
}

#[derive(Debug, Deserialize)]
pub struct RouteParams {
    start: Option<String>,
    goal: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    MissingParams,
    RouteNotFound { start: String, goal: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingParams => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "start and goal are required" })),
            )
                .into_response(),
            Self::RouteNotFound { start, goal } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "route not found", "start": start, "goal": goal })),
            )
                .into_response(),
        }
    }
}

/// `GET /route?start=..&goal=..`
async fn route(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RouteParams>,
) -> Result<Json<RoutePlan>, ApiError> {
    let (Some(start), Some(goal)) = (params.start, params.goal) else {
        return Err(ApiError::MissingParams);
    };
    match state.handle.current().compute_route(&start, &goal) {
        RouteOutcome::Found(plan) => Ok(Json(plan)),
        RouteOutcome::NotFound => Err(ApiError::RouteNotFound { start, goal }),
    }
}

async fn markers(State(state): State<Arc<AppState>>) -> Json<MarkerLayers> {
    Json(state.handle.current().markers().clone())
}

/// Every registered node with its calibrated position and floor.
async fn coordinates(State(state): State<Arc<AppState>>) -> Json<CoordinateRegistry> {
    Json(state.handle.current().coordinates().clone())
}

async fn floors(State(state): State<Arc<AppState>>) -> Json<Vec<FloorPrefs>> {
    Json(state.prefs.floors.clone())
}

async fn healthz(State(state): State<Arc<AppState>>) -> Json<Value> {
    let snapshot = state.handle.current();
    Json(json!({
        "status": "ok",
        "nodes": snapshot.graph().len(),
        "stores": snapshot.names().len(),
        "coordinates": snapshot.coordinates().len(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use wayfind_dry_tests::sample_wayfinder;

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            handle: WayfinderHandle::new(sample_wayfinder().unwrap()),
            prefs: ServicePrefs::default(),
        })
    }

    fn params(start: Option<&str>, goal: Option<&str>) -> Query<RouteParams> {
        Query(RouteParams {
            start: start.map(str::to_owned),
            goal: goal.map(str::to_owned),
        })
    }

    #[tokio::test]
    async fn search_is_case_insensitive_prefix() {
        let Json(found) = search(State(state()), Bytes::from_static(br#"{"query": "mo"}"#)).await;
        assert_eq!(found.stores, ["Mothercare"]);
        assert_eq!(
            serde_json::to_value(&found).unwrap(),
            json!({ "list_toko": ["Mothercare"] })
        );
        let Json(found) = search(State(state()), Bytes::from_static(br#"{"query": "P"}"#)).await;
        assert_eq!(found.stores, ["Pedro"]);
    }

    #[tokio::test]
    async fn search_without_string_query_is_empty() {
        let bodies: [&[u8]; 4] = [b"{}", br#"{"query": 7}"#, b"not json", b""];
        for body in bodies {
            let Json(found) = search(State(state()), Bytes::copy_from_slice(body)).await;
            assert!(found.stores.is_empty());
        }
    }

    #[tokio::test]
    async fn route_json_has_calibrated_coordinates() {
        let Json(plan) = route(State(state()), params(Some("Aldo"), Some("ZAP")))
            .await
            .unwrap();
        assert_eq!(plan.route, ["Aldo", "hall-1", "hall-2", "hall-3", "ZAP"]);
        assert_eq!(plan.hops, 8);

        let body = serde_json::to_value(&plan).unwrap();
        assert_eq!(
            body["coordinates"][4],
            json!({ "name": "ZAP", "coord": [100, 175], "floor": "3" })
        );
    }

    #[tokio::test]
    async fn unknown_or_unreachable_goal_is_404() {
        for goal in ["Kiosk", "Nowhere"] {
            let err = route(State(state()), params(Some("Aldo"), Some(goal)))
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::RouteNotFound { .. }));
            assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn missing_params_is_400() {
        let err = route(State(state()), params(Some("Aldo"), None))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn markers_are_keyed_by_floor() {
        let Json(layers) = markers(State(state())).await;
        let body = serde_json::to_value(&layers).unwrap();
        assert_eq!(body["floor-1"][0], json!({ "name": "Aldo", "x": 10, "y": 10 }));
        assert_eq!(body["floor-3"][0]["name"], "ZAP");
    }

    #[tokio::test]
    async fn coordinates_cover_stores_and_junctions() {
        let Json(registry) = coordinates(State(state())).await;
        let body = serde_json::to_value(&registry).unwrap();
        let listed = body.as_object().unwrap();

        assert_eq!(listed.len(), 9);
        assert_eq!(body["hall-1"], json!({ "coord": [20, 20], "floor": "1" }));
        assert_eq!(body["ZAP"], json!({ "coord": [100, 175], "floor": "3" }));
        assert!(!listed.contains_key("esc-12#1"));
    }

    #[tokio::test]
    async fn floors_and_health_reflect_state() {
        let state = state();
        let Json(listed) = floors(State(Arc::clone(&state))).await;
        assert_eq!(listed, state.prefs.floors);

        let Json(health) = healthz(State(state)).await;
        assert_eq!(health["stores"], 6);
        // 9 declared nodes plus two 2-segment escalators
        assert_eq!(health["nodes"], 13);
    }
}
