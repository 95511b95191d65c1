use rstar::primitives::GeomWithData;
use rstar::{RStarInsertionStrategy, RTree, RTreeParams};
use tracing::info;

use crate::distance::{Distance, Meters};
use crate::error::RouteError;
use crate::geopoint::GeoPoint;
use crate::graph::Graph;
use crate::snap::Snap;
use crate::types::NodeId;

// Mercator distances are only proportional to ground distances locally, so the
// final choice is made by haversine distance among the closest projected nodes
const SNAP_CANDIDATES: usize = 8;

type LocationIndexObject = GeomWithData<[f64; 2], NodeId>;

struct LocationIndexTreeParams;

impl RTreeParams for LocationIndexTreeParams {
    type DefaultInsertionStrategy = RStarInsertionStrategy;

    const MAX_SIZE: usize = 64;
    const MIN_SIZE: usize = 28;
    const REINSERTION_COUNT: usize = 5;
}

/// Nearest-node lookup over every node that has at least one edge.
pub struct LocationIndex {
    tree: RTree<LocationIndexObject, LocationIndexTreeParams>,
}

impl LocationIndex {
    pub fn build_from_graph(graph: &impl Graph) -> LocationIndex {
        info!("Building location index");

        let tree: RTree<LocationIndexObject, LocationIndexTreeParams> =
            RTree::bulk_load_with_params(
                (0..graph.node_count())
                    .filter(|&node_id| graph.node_edges_iter(node_id).next().is_some())
                    .map(|node_id| {
                        LocationIndexObject::new(graph.node_geometry(node_id).projected(), node_id)
                    })
                    .collect(),
            );

        info!("Finished building location index, {} nodes", tree.size());

        LocationIndex { tree }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Snaps `coordinates` to the closest node, failing with
    /// [`RouteError::NoNodeFound`] when that node is farther than `max_distance`.
    pub fn snap(
        &self,
        graph: &impl Graph,
        coordinates: &GeoPoint,
        max_distance: Distance<Meters>,
    ) -> Result<Snap, RouteError> {
        let closest = self
            .tree
            .nearest_neighbor_iter(&coordinates.projected())
            .take(SNAP_CANDIDATES)
            .map(|candidate| {
                let node_id = candidate.data;
                let distance = coordinates.haversine_distance(graph.node_geometry(node_id));
                (distance, node_id)
            })
            .min();

        match closest {
            Some((distance, node_id)) if distance <= max_distance => Ok(Snap::new(
                node_id,
                *graph.node_geometry(node_id),
                *coordinates,
                distance,
            )),
            _ => Err(RouteError::NoNodeFound {
                point: *coordinates,
                max_distance,
            }),
        }
    }
}
