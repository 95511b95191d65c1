use thiserror::Error;

use crate::{
    distance::{Distance, Meters},
    geopoint::GeoPoint,
    types::NodeId,
};

/// Failures of a single routing request. None of them is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
    #[error("No node found within {max_distance} of {point}")]
    NoNodeFound {
        point: GeoPoint,
        max_distance: Distance<Meters>,
    },
    #[error("No path found between node {start} and node {end}")]
    NoPathFound { start: NodeId, end: NodeId },
    #[error("Search budget exceeded after expanding {expanded} nodes")]
    SearchBudgetExceeded { expanded: usize },
    #[error("Search deadline exceeded after expanding {expanded} nodes")]
    DeadlineExceeded { expanded: usize },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read network file")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse network GeoJSON")]
    GeoJson(#[from] geojson::Error),
    #[error("Network must be a GeoJSON FeatureCollection")]
    NotAFeatureCollection,
    #[error("Feature {feature}: missing or invalid property `{property}`")]
    InvalidProperty {
        feature: usize,
        property: &'static str,
    },
    #[error("Feature {feature}: unsupported geometry")]
    UnsupportedGeometry { feature: usize },
    #[error("Feature {feature}: an edge needs at least two coordinates")]
    DegenerateEdge { feature: usize },
    #[error("Feature {feature}: coordinate out of WGS84 bounds")]
    InvalidCoordinate { feature: usize },
    #[error("Network contains no edges")]
    EmptyNetwork,
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
