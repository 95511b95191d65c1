use std::{f64::consts::PI, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    constants::EARTH_RADIUS_METERS,
    distance::{Distance, Meters},
    error::RouteError,
};

// Web mercator is undefined at the poles
const MAX_PROJECTED_LATITUDE: f64 = 85.051_128;

/// A WGS84 coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint { lat, lng }
    }

    /// Builds a coordinate, rejecting values outside [-90, 90] x [-180, 180].
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, RouteError> {
        let point = GeoPoint::new(lat, lng);
        if !point.is_valid() {
            return Err(RouteError::InvalidCoordinate(format!(
                "{}, {} is outside WGS84 bounds",
                lat, lng
            )));
        }
        Ok(point)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// GeoJSON position, longitude first.
    pub fn to_position(&self) -> Vec<f64> {
        vec![self.lng, self.lat]
    }

    pub fn haversine_distance(&self, other: &GeoPoint) -> Distance<Meters> {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let dlat = lat2 - lat1;
        let dlng = (other.lng - self.lng).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        Distance::from(EARTH_RADIUS_METERS * c)
    }

    /// Spherical mercator projection, used as the planar space of the spatial indexes.
    pub(crate) fn projected(&self) -> [f64; 2] {
        let lat = self
            .lat
            .clamp(-MAX_PROJECTED_LATITUDE, MAX_PROJECTED_LATITUDE)
            .to_radians();
        let x = EARTH_RADIUS_METERS * self.lng.to_radians();
        let y = EARTH_RADIUS_METERS * (lat / 2.0 + PI / 4.0).tan().ln();
        [x, y]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

impl From<&GeoPoint> for geo::Coord {
    fn from(point: &GeoPoint) -> Self {
        geo::coord! { x: point.lng, y: point.lat }
    }
}

impl From<&GeoPoint> for geo::Point {
    fn from(point: &GeoPoint) -> Self {
        geo::Point::new(point.lng, point.lat)
    }
}

impl From<geo::Point> for GeoPoint {
    fn from(point: geo::Point) -> Self {
        GeoPoint::new(point.y(), point.x())
    }
}

/// Parses the `"lat,lon"` form used by query strings.
impl FromStr for GeoPoint {
    type Err = RouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || RouteError::InvalidCoordinate(format!("cannot parse \"{}\"", value));

        let (lat, lng) = value.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

        GeoPoint::try_new(lat, lng)
    }
}
