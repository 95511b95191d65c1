use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde::Serialize;
use serde_json::json;

use crate::{
    constants::WALKING_SPEED_METERS_PER_SECOND,
    distance::{Distance, Meters},
    geopoint::GeoPoint,
    landmarks::landmark::Landmark,
    snap::Snap,
    types::{EdgeId, LandmarkId},
};

/// A landmark passed by a route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteLandmark {
    pub id: LandmarkId,
    pub name: String,
    pub description: String,
    pub kind: Option<String>,
    pub coordinates: GeoPoint,
    /// Whether the landmark matched one of the requested concepts
    pub requested: bool,
}

impl RouteLandmark {
    pub fn new(landmark: &Landmark, requested: bool) -> Self {
        RouteLandmark {
            id: landmark.id(),
            name: landmark.name().to_string(),
            description: landmark.description().to_string(),
            kind: landmark.kind().map(String::from),
            coordinates: *landmark.coordinates(),
            requested,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RouteResult {
    geometry: Vec<GeoPoint>,
    distance: Distance<Meters>,
    landmarks: Vec<RouteLandmark>,
    edges: Vec<EdgeId>,
    start: Snap,
    end: Snap,
    nodes_expanded: usize,
}

impl RouteResult {
    pub fn new(
        geometry: Vec<GeoPoint>,
        distance: Distance<Meters>,
        landmarks: Vec<RouteLandmark>,
        edges: Vec<EdgeId>,
        (start, end): (Snap, Snap),
        nodes_expanded: usize,
    ) -> Self {
        RouteResult {
            geometry,
            distance,
            landmarks,
            edges,
            start,
            end,
            nodes_expanded,
        }
    }

    /// Continuous geometry from the start node to the end node, a single point when both are the same.
    pub fn geometry(&self) -> &[GeoPoint] {
        &self.geometry
    }

    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }

    /// Landmarks in the order they are first met along the route.
    pub fn landmarks(&self) -> &[RouteLandmark] {
        &self.landmarks
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn start(&self) -> &Snap {
        &self.start
    }

    pub fn end(&self) -> &Snap {
        &self.end
    }

    pub fn nodes_expanded(&self) -> usize {
        self.nodes_expanded
    }

    pub fn walking_duration_minutes(&self) -> u64 {
        (self.distance.value() / WALKING_SPEED_METERS_PER_SECOND / 60.0).floor() as u64
    }

    pub fn to_feature(&self) -> Feature {
        let value = if self.geometry.len() == 1 {
            Value::Point(self.geometry[0].to_position())
        } else {
            Value::LineString(self.geometry.iter().map(GeoPoint::to_position).collect())
        };

        let mut properties = JsonObject::new();
        properties.insert(String::from("distance"), json!(self.distance.value()));
        properties.insert(
            String::from("walking_duration"),
            json!(self.walking_duration_minutes()),
        );
        properties.insert(
            String::from("landmarks"),
            json!(
                self.landmarks
                    .iter()
                    .map(|landmark| landmark.name.as_str())
                    .collect::<Vec<_>>()
            ),
        );

        Feature {
            bbox: None,
            geometry: Some(Geometry::new(value)),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: vec![self.to_feature()],
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meters;

    fn snap(lat: f64, lng: f64) -> Snap {
        let point = GeoPoint::new(lat, lng);
        Snap::new(0, point, point, meters!(0))
    }

    fn result(geometry: Vec<GeoPoint>, distance: Distance<Meters>) -> RouteResult {
        RouteResult::new(
            geometry,
            distance,
            vec![],
            vec![],
            (snap(35.0, 135.0), snap(35.0, 135.0)),
            0,
        )
    }

    #[test]
    fn walking_duration_rounds_down() {
        // 1.4 m/s, 840 m is exactly ten minutes
        assert_eq!(result(vec![], meters!(840)).walking_duration_minutes(), 10);
        assert_eq!(result(vec![], meters!(839)).walking_duration_minutes(), 9);
        assert_eq!(result(vec![], meters!(0)).walking_duration_minutes(), 0);
    }

    #[test]
    fn line_feature_has_lng_lat_positions() {
        let route = result(
            vec![GeoPoint::new(35.0, 135.0), GeoPoint::new(35.001, 135.002)],
            meters!(200),
        );

        let feature = route.to_feature();

        match feature.geometry.map(|geometry| geometry.value) {
            Some(Value::LineString(positions)) => {
                assert_eq!(positions, vec![vec![135.0, 35.0], vec![135.002, 35.001]]);
            }
            other => panic!("Expected a line string, got {:?}", other),
        }
        assert_eq!(
            feature.properties.and_then(|properties| properties.get("distance").cloned()),
            Some(json!(200.0))
        );
    }

    #[test]
    fn single_point_route_is_a_point_feature() {
        let route = result(vec![GeoPoint::new(35.0, 135.0)], meters!(0));

        let collection = route.to_feature_collection();

        assert_eq!(collection.features.len(), 1);
        assert!(matches!(
            collection.features[0].geometry.as_ref().map(|geometry| &geometry.value),
            Some(Value::Point(_))
        ));
    }
}
