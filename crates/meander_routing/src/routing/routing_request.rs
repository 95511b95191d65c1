use std::time::Instant;

use crate::{geopoint::GeoPoint, weights::RawWeights};

#[derive(Clone, Copy, Debug, Default)]
pub struct RoutingRequestOptions {
    /// Overrides the configured expansion budget, zero meaning no limit
    pub max_expansions: Option<usize>,
    /// Overrides the configured search timeout
    pub deadline: Option<Instant>,
}

#[derive(Clone, Debug)]
pub struct RoutingRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub weights: RawWeights,
    /// Landmark concepts, matched against landmark names and kinds
    pub landmarks: Vec<String>,
    pub options: Option<RoutingRequestOptions>,
}

impl RoutingRequest {
    pub fn new(start: GeoPoint, end: GeoPoint, weights: RawWeights) -> Self {
        RoutingRequest {
            start,
            end,
            weights,
            landmarks: vec![],
            options: None,
        }
    }

    pub fn with_landmarks<I, S>(mut self, landmarks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.landmarks = landmarks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_options(mut self, options: RoutingRequestOptions) -> Self {
        self.options = Some(options);
        self
    }
}
