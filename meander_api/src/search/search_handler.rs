use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geojson::GeoJson;
use meander_routing::geopoint::GeoPoint;
use meander_routing::routing::route_result::RouteResult;
use meander_routing::routing::routing_request::RoutingRequest;
use meander_routing::weights::RawWeights;
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

const WEIGHT_PREFIX: &str = "weight_";

#[derive(Serialize)]
pub struct Place {
    name: String,
    description: String,
    location: GeoPoint,
}

#[derive(Serialize)]
pub struct SearchResponse {
    path_geo_json: GeoJson,
    distance_in_meter: f64,
    walking_duration_in_minutes: u64,
    places: Vec<Place>,
}

impl From<RouteResult> for SearchResponse {
    fn from(result: RouteResult) -> Self {
        SearchResponse {
            path_geo_json: GeoJson::FeatureCollection(result.to_feature_collection()),
            distance_in_meter: result.distance().value(),
            walking_duration_in_minutes: result.walking_duration_minutes(),
            places: result
                .landmarks()
                .iter()
                .map(|landmark| Place {
                    name: landmark.name.clone(),
                    description: landmark.description.clone(),
                    location: landmark.coordinates,
                })
                .collect(),
        }
    }
}

impl IntoResponse for SearchResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `s` and `e` as `lat,lon`, every `weight_*` preference, and `landmarks` as a comma separated list.
pub fn parse_search_query(params: &HashMap<String, String>) -> Result<RoutingRequest, ApiError> {
    let location = |key: &str| -> Result<GeoPoint, ApiError> {
        params
            .get(key)
            .ok_or_else(|| ApiError::BadRequest(format!("Missing query parameter `{}`", key)))?
            .parse::<GeoPoint>()
            .map_err(ApiError::from)
    };

    let weights = params
        .iter()
        .filter(|(key, _)| key.starts_with(WEIGHT_PREFIX))
        .map(|(key, value)| {
            value
                .trim()
                .parse::<f64>()
                .map(|value| (key.clone(), value))
                .map_err(|_| ApiError::BadRequest(format!("`{}` is not a number", key)))
        })
        .collect::<Result<HashMap<String, f64>, ApiError>>()?;

    let landmarks: Vec<String> = params
        .get("landmarks")
        .map(|landmarks| {
            landmarks
                .split(',')
                .map(str::trim)
                .filter(|landmark| !landmark.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default();

    Ok(
        RoutingRequest::new(location("s")?, location("e")?, RawWeights::from_map(&weights)?)
            .with_landmarks(landmarks),
    )
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<SearchResponse, ApiError> {
    let request = parse_search_query(&params)?;
    let meander = state.meander.load();

    info!(
        "Searching route from {} to {} with landmarks {:?}",
        request.start, request.end, request.landmarks
    );

    let result = tokio::task::spawn_blocking(move || meander.route(&request)).await??;

    Ok(SearchResponse::from(result))
}
