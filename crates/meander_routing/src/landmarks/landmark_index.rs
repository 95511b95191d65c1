use fxhash::{FxHashMap, FxHashSet};
use rayon::prelude::*;
use rstar::{AABB, RTree, primitives::GeomWithData};
use tracing::{debug, info};

use crate::{
    distance::{Distance, Meters},
    geometry::{closest_on_segment, degree_padding},
    geopoint::GeoPoint,
    graph::{EdgeDirection, Graph},
    types::{EdgeId, LandmarkId},
};

use super::landmark::{Landmark, normalize_key};

/// A landmark close to an edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeLandmark {
    pub landmark_id: LandmarkId,
    /// Fraction of the edge length, measured in forward direction, at which the
    /// landmark is closest to the edge
    pub position: f64,
    /// Distance in meters between the landmark and the edge
    pub distance: f64,
}

type LandmarkIndexObject = GeomWithData<[f64; 2], LandmarkId>;

/// Static proximity relation between landmarks and edges.
pub struct LandmarkIndex {
    landmarks: Vec<Landmark>,
    edge_landmarks: Vec<Vec<EdgeLandmark>>,
    by_key: FxHashMap<String, Vec<LandmarkId>>,
}

impl LandmarkIndex {
    pub fn build<G>(graph: &G, mut landmarks: Vec<Landmark>, radius: Distance<Meters>) -> Self
    where
        G: Graph + Sync,
    {
        info!(
            "Building landmark index for {} landmarks, radius {}",
            landmarks.len(),
            radius
        );

        for (landmark_id, landmark) in landmarks.iter_mut().enumerate() {
            landmark.set_id(landmark_id);
        }

        let tree: RTree<LandmarkIndexObject> = RTree::bulk_load(
            landmarks
                .iter()
                .map(|landmark| {
                    let coordinates = landmark.coordinates();
                    LandmarkIndexObject::new([coordinates.lng, coordinates.lat], landmark.id())
                })
                .collect(),
        );

        let edge_landmarks: Vec<Vec<EdgeLandmark>> = (0..graph.edge_count())
            .into_par_iter()
            .map(|edge_id| {
                landmarks_along_geometry(&tree, &landmarks, graph.edge_geometry(edge_id), radius)
            })
            .collect();

        let mut by_key: FxHashMap<String, Vec<LandmarkId>> = FxHashMap::default();
        for landmark in &landmarks {
            for key in landmark.lookup_keys() {
                let ids = by_key.entry(key).or_default();
                if !ids.contains(&landmark.id()) {
                    ids.push(landmark.id());
                }
            }
        }

        info!(
            "Finished building landmark index, {} edges have landmarks nearby",
            edge_landmarks.iter().filter(|near| !near.is_empty()).count()
        );

        LandmarkIndex {
            landmarks,
            edge_landmarks,
            by_key,
        }
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    pub fn landmark(&self, landmark_id: LandmarkId) -> &Landmark {
        &self.landmarks[landmark_id]
    }

    /// Landmarks near `edge_id`, ordered along the edge in forward direction.
    pub fn landmarks_near(&self, edge_id: EdgeId) -> &[EdgeLandmark] {
        &self.edge_landmarks[edge_id]
    }

    /// Landmarks near `edge_id` in the order a walker traversing it in `direction` meets them.
    pub fn landmarks_along(
        &self,
        edge_id: EdgeId,
        direction: EdgeDirection,
    ) -> Box<dyn Iterator<Item = &EdgeLandmark> + '_> {
        let near = self.landmarks_near(edge_id).iter();
        match direction {
            EdgeDirection::Forward => Box::new(near),
            EdgeDirection::Backward => Box::new(near.rev()),
        }
    }

    pub fn is_near_any(&self, edge_id: EdgeId, landmarks: &FxHashSet<LandmarkId>) -> bool {
        !landmarks.is_empty()
            && self.edge_landmarks[edge_id]
                .iter()
                .any(|near| landmarks.contains(&near.landmark_id))
    }

    /// Resolves requested landmark concepts to landmark ids by name or kind.
    pub fn resolve<S: AsRef<str>>(&self, requested: &[S]) -> FxHashSet<LandmarkId> {
        let mut resolved = FxHashSet::default();

        for concept in requested {
            match self.by_key.get(&normalize_key(concept.as_ref())) {
                Some(ids) => resolved.extend(ids.iter().copied()),
                None => debug!("No landmark matches requested concept {:?}", concept.as_ref()),
            }
        }

        resolved
    }
}

fn landmarks_along_geometry(
    tree: &RTree<LandmarkIndexObject>,
    landmarks: &[Landmark],
    geometry: &[GeoPoint],
    radius: Distance<Meters>,
) -> Vec<EdgeLandmark> {
    let segment_lengths: Vec<f64> = geometry
        .windows(2)
        .map(|segment| segment[0].haversine_distance(&segment[1]).value())
        .collect();
    let total_length: f64 = segment_lengths.iter().sum();

    let mut found: Vec<EdgeLandmark> = Vec::new();
    let mut offset = 0.0;

    for (segment, segment_length) in geometry.windows(2).zip(segment_lengths) {
        let (start, end) = (&segment[0], &segment[1]);
        let (lat_padding, lng_padding) =
            degree_padding(if start.lat.abs() > end.lat.abs() { start } else { end }, radius);

        let envelope = AABB::from_corners(
            [
                start.lng.min(end.lng) - lng_padding,
                start.lat.min(end.lat) - lat_padding,
            ],
            [
                start.lng.max(end.lng) + lng_padding,
                start.lat.max(end.lat) + lat_padding,
            ],
        );

        for candidate in tree.locate_in_envelope_intersecting(&envelope) {
            let landmark_id = candidate.data;
            let (distance, fraction) =
                closest_on_segment(landmarks[landmark_id].coordinates(), start, end);

            if distance > radius.value() {
                continue;
            }

            let position = if total_length > 0.0 {
                (offset + fraction * segment_length) / total_length
            } else {
                0.0
            };

            match found
                .iter_mut()
                .find(|near| near.landmark_id == landmark_id)
            {
                Some(near) if distance < near.distance => {
                    near.distance = distance;
                    near.position = position;
                }
                Some(_) => {}
                None => found.push(EdgeLandmark {
                    landmark_id,
                    position,
                    distance,
                }),
            }
        }

        offset += segment_length;
    }

    found.sort_by(|a, b| {
        a.position
            .total_cmp(&b.position)
            .then_with(|| a.landmark_id.cmp(&b.landmark_id))
    });

    found
}
