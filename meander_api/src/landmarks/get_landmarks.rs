use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geojson::Value::Point;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};
use serde::Serialize;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct GetLandmarksResponse(GeoJson);

impl IntoResponse for GetLandmarksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

pub async fn get_landmarks(
    State(state): State<Arc<AppState>>,
) -> Result<GetLandmarksResponse, ApiError> {
    let meander = state.meander.load();

    let features = meander
        .landmarks()
        .landmarks()
        .iter()
        .map(|landmark| {
            let mut properties = JsonObject::new();
            properties.insert(String::from("name"), json!(landmark.name()));
            properties.insert(String::from("description"), json!(landmark.description()));
            properties.insert(String::from("kind"), json!(landmark.kind()));

            Feature {
                geometry: Some(Geometry::new(Point(landmark.coordinates().to_position()))),
                properties: Some(properties),
                id: None,
                bbox: None,
                foreign_members: None,
            }
        })
        .collect();

    Ok(GetLandmarksResponse(GeoJson::FeatureCollection(
        FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        },
    )))
}
