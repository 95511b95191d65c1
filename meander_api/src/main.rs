mod config;
mod error;
mod landmarks;
mod reload;
mod search;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Router, serve};
use meander_routing::meander::Meander;
use meander_routing::snapshot::MeanderSnapshot;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info};

use crate::config::ApiConfig;
use crate::landmarks::get_landmarks::get_landmarks;
use crate::reload::reload_handler::reload_handler;
use crate::search::search_handler::search_handler;
use crate::state::AppState;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search", get(search_handler))
        .route("/landmarks", get(get_landmarks))
        .route("/reload", post(reload_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_max_level(if std::env::var("MEANDER_DEBUG").is_ok() {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let network_file = config.network_file.clone();
    let engine_config = config.engine.clone();
    let meander =
        tokio::task::spawn_blocking(move || Meander::from_geojson_file(network_file, engine_config))
            .await?
            .with_context(|| format!("Failed to load {}", config.network_file.display()))?;

    let state = Arc::new(AppState {
        meander: MeanderSnapshot::new(meander),
        network_file: config.network_file,
        engine_config: config.engine,
    });

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;

    info!("Listening on {}", config.bind_address);

    serve(listener, app(state)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use meander_routing::config::EngineConfig;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    const WEIGHTS: &str = "weight_length=1&weight_green_index=0&weight_water_index=0\
        &weight_shade_index=0&weight_slope_index=0&weight_road_safety=0&weight_isolation=0";

    fn edge(source: u64, target: u64, coordinates: Value, length: f64, green: f64) -> Value {
        json!({
            "type": "Feature",
            "geometry": { "type": "LineString", "coordinates": coordinates },
            "properties": {
                "source": source, "target": target, "length": length,
                "green_index": green, "water_index": 0.5, "shade_index": 0.5,
                "slope_index": 0.5, "road_safety": 0.5, "isolation": 0.5
            }
        })
    }

    fn network(with_shortcut: bool) -> String {
        let mut features = vec![
            edge(1, 2, json!([[135.7, 35.0], [135.7, 35.0009]]), 100.0, 0.5),
            edge(2, 3, json!([[135.7, 35.0009], [135.702, 35.0018]]), 150.0, 0.1),
            edge(3, 4, json!([[135.702, 35.0018], [135.7, 35.0027]]), 150.0, 0.1),
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [135.69995, 35.0018] },
                "properties": { "name": "Fushimi Shrine", "description": "Small shrine", "kind": "shrine" }
            }),
        ];
        if with_shortcut {
            features.push(edge(2, 4, json!([[135.7, 35.0009], [135.7, 35.0027]]), 500.0, 0.9));
        }
        json!({ "type": "FeatureCollection", "features": features }).to_string()
    }

    fn state(network_file: PathBuf, text: &str) -> Arc<AppState> {
        let engine_config = EngineConfig {
            landmark_weight: 1.0,
            ..EngineConfig::default()
        };
        let meander = Meander::from_geojson_str(text, engine_config.clone()).unwrap();

        Arc::new(AppState {
            meander: MeanderSnapshot::new(meander),
            network_file,
            engine_config,
        })
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn search_returns_route_and_places() {
        let app = app(state(PathBuf::from("unused"), &network(true)));

        let (status, body) = call(
            app,
            Method::GET,
            &format!("/search?s=35.0,135.7&e=35.0027,135.7&{}&landmarks=shrine", WEIGHTS),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["distance_in_meter"], json!(600.0));
        assert_eq!(body["walking_duration_in_minutes"], json!(7));
        assert_eq!(body["places"][0]["name"], json!("Fushimi Shrine"));
        assert_eq!(body["path_geo_json"]["type"], json!("FeatureCollection"));
    }

    #[tokio::test]
    async fn search_errors_map_to_statuses() {
        let state = state(PathBuf::from("unused"), &network(true));

        let (status, _) = call(
            app(state.clone()),
            Method::GET,
            "/search?s=35.0,135.7&e=35.0027,135.7&weight_length=1",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = call(
            app(state),
            Method::GET,
            &format!("/search?s=35.0,135.7&e=36.0,136.0&{}", WEIGHTS),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn lists_landmarks() {
        let app = app(state(PathBuf::from("unused"), &network(true)));

        let (status, body) = call(app, Method::GET, "/landmarks").await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["features"][0]["properties"]["kind"], json!("shrine"));
        assert_eq!(
            body["features"][0]["geometry"]["coordinates"],
            json!([135.69995, 35.0018])
        );
    }

    #[tokio::test]
    async fn failed_reload_keeps_the_current_network() {
        let network_file = std::env::temp_dir().join(format!(
            "meander-missing-{}.geojson",
            std::process::id()
        ));
        let state = state(network_file, &network(false));

        let (status, body) = call(app(state.clone()), Method::POST, "/reload").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(String::from_utf8(body).unwrap().starts_with("Failed to reload"));
        assert_eq!(state.meander.load().graph().edges().len(), 3);
    }

    #[tokio::test]
    async fn reload_swaps_the_network() {
        let network_file =
            std::env::temp_dir().join(format!("meander-reload-{}.geojson", std::process::id()));
        std::fs::write(&network_file, network(true)).unwrap();

        let state = state(network_file.clone(), &network(false));
        assert_eq!(state.meander.load().graph().edges().len(), 3);

        let (status, body) = call(app(state.clone()), Method::POST, "/reload").await;
        std::fs::remove_file(&network_file).ok();

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["edges"], json!(4));
        assert_eq!(state.meander.load().graph().edges().len(), 4);
    }
}
