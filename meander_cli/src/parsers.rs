use meander_routing::geopoint::GeoPoint;

/// Parses a `lat,lon` location
pub fn parse_location(value: &str) -> Result<GeoPoint, String> {
    value.parse::<GeoPoint>().map_err(|error| error.to_string())
}
