use crate::types::{EdgeId, NodeId};
use crate::weighting::Weight;

pub(crate) const INVALID_NODE: NodeId = usize::MAX;
pub(crate) const INVALID_EDGE: EdgeId = usize::MAX;
pub(crate) const MAX_WEIGHT: Weight = Weight::MAX;

pub(crate) const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
pub(crate) const METERS_PER_DEGREE_LATITUDE: f64 = 111_320.0;

/// Edge costs are blended in f64 meters and stored as integer millimeters
pub(crate) const WEIGHT_PRECISION: f64 = 1000.0;

/// Landmark affinity weight added to every preference before normalization
pub const WEIGHT_LANDMARKS: f64 = 0.2;

pub const WALKING_SPEED_METERS_PER_SECOND: f64 = 1.4;

pub const DEFAULT_MAX_SNAP_DISTANCE_METERS: f64 = 500.0;
pub const DEFAULT_LANDMARK_RADIUS_METERS: f64 = 50.0;
pub const DEFAULT_MAX_EXPANSIONS: usize = 1_000_000;
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 5_000;
