use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use snapshot::{DirStore, SnapshotPayload, SnapshotStore};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<DirStore>>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data_dir =
        env::var("SNAPSHOT_DATA_DIR").unwrap_or_else(|_| "data/snapshots".to_string());
    let addr: SocketAddr = env::var("SNAPSHOT_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:9200".to_string())
        .parse()
        .expect("invalid SNAPSHOT_ADDR");

    let store = DirStore::new(&data_dir).expect("snapshot data dir unavailable");
    let state = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    // The page calls this service cross-origin, so CORS stays permissive.
    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/loadMapData", get(load_map_data))
        .route("/saveMapData", post(save_map_data))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    info!("snapshot server listening on http://{addr}");
    axum::serve(tokio::net::TcpListener::bind(addr).await.unwrap(), app)
        .await
        .unwrap();
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

#[derive(Debug, Deserialize)]
struct LoadParams {
    key: String,
}

async fn load_map_data(
    State(state): State<AppState>,
    Query(params): Query<LoadParams>,
) -> Response {
    let fetched = state.store.lock().fetch(&params.key);
    match fetched {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Data not found" })),
        )
            .into_response(),
        Err(err) => {
            error!("snapshot fetch failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to load data" })),
            )
                .into_response()
        }
    }
}

async fn save_map_data(
    State(state): State<AppState>,
    Json(payload): Json<SnapshotPayload>,
) -> Response {
    let stored = state.store.lock().store(payload);
    match stored {
        Ok(key) => (StatusCode::OK, Json(json!({ "key": key }))).into_response(),
        Err(err) => {
            error!("snapshot store failed: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to save data" })),
            )
                .into_response()
        }
    }
}
