use std::sync::Arc;

use anyhow::Context;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meander_routing::graph::Graph;
use meander_routing::meander::Meander;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ReloadResponse {
    nodes: usize,
    edges: usize,
    landmarks: usize,
}

impl IntoResponse for ReloadResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Loads the network file again and swaps it in. Searches already running finish on the old network.
pub async fn reload_handler(
    State(state): State<Arc<AppState>>,
) -> Result<ReloadResponse, ApiError> {
    let network_file = state.network_file.clone();
    let config = state.engine_config.clone();

    info!("Reloading network from {}", network_file.display());

    let meander = tokio::task::spawn_blocking(move || Meander::from_geojson_file(network_file, config))
        .await?
        .with_context(|| format!("Failed to reload {}", state.network_file.display()))?;

    let response = ReloadResponse {
        nodes: meander.graph().node_count(),
        edges: meander.graph().edge_count(),
        landmarks: meander.landmarks().landmarks().len(),
    };

    state.meander.swap(meander);

    Ok(response)
}
