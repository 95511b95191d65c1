use geo::{Closest, Distance as _, Haversine, HaversineClosestPoint, Line};

use crate::{
    constants::METERS_PER_DEGREE_LATITUDE,
    distance::{Distance, Meters},
    geopoint::GeoPoint,
    meters,
};

pub fn compute_geometry_distance(geometry: &[GeoPoint]) -> Distance<Meters> {
    geometry
        .windows(2)
        .map(|segment| segment[0].haversine_distance(&segment[1]))
        .fold(meters!(0), |total, distance| total + distance)
}

/// Closest approach of `point` to the great-circle segment `start`-`end`.
///
/// Returns the distance in meters and the fraction along the segment (0 at
/// `start`, 1 at `end`).
pub fn closest_on_segment(point: &GeoPoint, start: &GeoPoint, end: &GeoPoint) -> (f64, f64) {
    let line: Line = Line::new(start, end);
    let query = geo::Point::from(point);

    let segment_length = Haversine.distance(line.start_point(), line.end_point());
    if segment_length <= 0.0 {
        return (Haversine.distance(query, line.start_point()), 0.0);
    }

    let closest = match line.haversine_closest_point(&query) {
        Closest::Intersection(closest) | Closest::SinglePoint(closest) => closest,
        Closest::Indeterminate => line.start_point(),
    };

    let fraction = Haversine.distance(line.start_point(), closest) / segment_length;

    (Haversine.distance(query, closest), fraction.clamp(0.0, 1.0))
}

/// Half-widths in degrees of a box extending `radius` around `point`.
pub fn degree_padding(point: &GeoPoint, radius: Distance<Meters>) -> (f64, f64) {
    let lat_padding = radius.value() / METERS_PER_DEGREE_LATITUDE;
    let cos_lat = point.lat.to_radians().cos().max(0.01);
    (lat_padding, lat_padding / cos_lat)
}
