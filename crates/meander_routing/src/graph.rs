use crate::{
    distance::{Distance, Meters},
    geopoint::GeoPoint,
    properties::edge_attributes::EdgeAttributes,
    types::{EdgeId, NodeId},
};

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum EdgeDirection {
    /// From `start_node` to `end_node`
    Forward,
    Backward,
}

impl EdgeDirection {
    pub fn opposite(&self) -> Self {
        match self {
            EdgeDirection::Forward => EdgeDirection::Backward,
            EdgeDirection::Backward => EdgeDirection::Forward,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GraphEdge {
    id: EdgeId,
    start_node: NodeId,
    end_node: NodeId,
    distance: Distance<Meters>,
    attributes: EdgeAttributes,
    one_way: bool,
}

impl GraphEdge {
    pub(crate) fn new(
        id: EdgeId,
        start_node: NodeId,
        end_node: NodeId,
        distance: Distance<Meters>,
        attributes: EdgeAttributes,
        one_way: bool,
    ) -> Self {
        GraphEdge {
            id,
            start_node,
            end_node,
            distance,
            attributes,
            one_way,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    pub fn adj_node(&self, node: NodeId) -> NodeId {
        if self.start_node == node {
            self.end_node
        } else {
            self.start_node
        }
    }

    /// Physical length, independent of any weighting.
    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }

    pub fn attributes(&self) -> &EdgeAttributes {
        &self.attributes
    }

    pub fn is_one_way(&self) -> bool {
        self.one_way
    }

    pub fn is_traversable(&self, direction: EdgeDirection) -> bool {
        direction == EdgeDirection::Forward || !self.one_way
    }
}

/// Read-only access to a road network.
pub trait Graph {
    type EdgeIterator<'a>: Iterator<Item = EdgeId>
    where
        Self: 'a;

    fn node_count(&self) -> usize;
    fn edge_count(&self) -> usize;

    /// Edges incident to `node`, in insertion order.
    fn node_edges_iter(&self, node: NodeId) -> Self::EdgeIterator<'_>;

    fn edge(&self, edge: EdgeId) -> &GraphEdge;

    /// Geometry of the edge in forward direction, at least two points.
    fn edge_geometry(&self, edge: EdgeId) -> &[GeoPoint];

    fn node_geometry(&self, node: NodeId) -> &GeoPoint;

    fn edge_direction(&self, edge_id: EdgeId, start: NodeId) -> EdgeDirection {
        let edge = self.edge(edge_id);

        if edge.start_node() == start {
            return EdgeDirection::Forward;
        }

        if edge.end_node() == start {
            return EdgeDirection::Backward;
        }

        panic!(
            "Node {} is neither the start nor the end of edge {}",
            start, edge_id
        )
    }
}
