use serde::Serialize;

use crate::{
    distance::{Distance, Meters},
    geopoint::GeoPoint,
    types::NodeId,
};

/// A query coordinate resolved to a graph node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Snap {
    pub node_id: NodeId,
    /// Coordinates of the node
    pub coordinates: GeoPoint,
    pub query: GeoPoint,
    distance: Distance<Meters>,
}

impl Snap {
    pub fn new(
        node_id: NodeId,
        coordinates: GeoPoint,
        query: GeoPoint,
        distance: Distance<Meters>,
    ) -> Self {
        Snap {
            node_id,
            coordinates,
            query,
            distance,
        }
    }

    /// Distance between the query coordinate and the node.
    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }
}
