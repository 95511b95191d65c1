use fxhash::FxHashSet;

use crate::{
    distance::{Distance, Meters},
    geopoint::GeoPoint,
    graph::{EdgeDirection, Graph},
    landmarks::landmark_index::LandmarkIndex,
    snap::Snap,
    types::{EdgeId, LandmarkId},
};

use super::route_result::{RouteLandmark, RouteResult};

/// Turns the edges found by a search into the route handed back to the caller.
pub fn build_route_result(
    graph: &impl Graph,
    landmark_index: &LandmarkIndex,
    requested_landmarks: &FxHashSet<LandmarkId>,
    edges: &[(EdgeId, EdgeDirection)],
    snaps: (Snap, Snap),
    nodes_expanded: usize,
) -> RouteResult {
    let (start, _) = snaps;

    let mut geometry: Vec<GeoPoint> = Vec::with_capacity(edges.len() * 4 + 1);
    let mut distance: Distance<Meters> = Distance::zero();
    let mut seen: FxHashSet<LandmarkId> = FxHashSet::default();
    let mut landmarks: Vec<RouteLandmark> = Vec::new();

    for &(edge_id, direction) in edges {
        let edge_geometry = graph.edge_geometry(edge_id);

        // The first point of an edge is the last point of the previous one
        let skip = usize::from(!geometry.is_empty());
        match direction {
            EdgeDirection::Forward => geometry.extend(edge_geometry.iter().skip(skip)),
            EdgeDirection::Backward => geometry.extend(edge_geometry.iter().rev().skip(skip)),
        }

        distance = distance + graph.edge(edge_id).distance();

        for near in landmark_index.landmarks_along(edge_id, direction) {
            if seen.insert(near.landmark_id) {
                landmarks.push(RouteLandmark::new(
                    landmark_index.landmark(near.landmark_id),
                    requested_landmarks.contains(&near.landmark_id),
                ));
            }
        }
    }

    if geometry.is_empty() {
        geometry.push(start.coordinates);
    }

    RouteResult::new(
        geometry,
        distance,
        landmarks,
        edges.iter().map(|&(edge_id, _)| edge_id).collect(),
        snaps,
        nodes_expanded,
    )
}
