use crate::{
    distance::{Distance, Meters},
    geometry::compute_geometry_distance,
    geopoint::GeoPoint,
    graph::{Graph, GraphEdge},
    properties::edge_attributes::EdgeAttributes,
    types::{EdgeId, NodeId},
};

/// In-memory walking network. Immutable once built.
#[derive(Default)]
pub struct RoadGraph {
    nodes: Vec<GeoPoint>,
    edges: Vec<GraphEdge>,
    geometry: Vec<Vec<GeoPoint>>,
    adjacency_list: Vec<Vec<EdgeId>>,
}

impl RoadGraph {
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    pub fn node_edges(&self, node: NodeId) -> &[EdgeId] {
        &self.adjacency_list[node]
    }

    pub fn total_distance(&self) -> Distance<Meters> {
        self.edges.iter().map(|edge| edge.distance()).sum()
    }
}

impl Graph for RoadGraph {
    type EdgeIterator<'a> = std::iter::Copied<std::slice::Iter<'a, EdgeId>>;

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_edges_iter(&self, node: NodeId) -> Self::EdgeIterator<'_> {
        self.adjacency_list[node].iter().copied()
    }

    fn edge(&self, edge: EdgeId) -> &GraphEdge {
        &self.edges[edge]
    }

    fn edge_geometry(&self, edge: EdgeId) -> &[GeoPoint] {
        &self.geometry[edge][..]
    }

    fn node_geometry(&self, node: NodeId) -> &GeoPoint {
        &self.nodes[node]
    }
}

/// Description of an edge to add to a [`GraphBuilder`].
pub struct NewEdge {
    start: NodeId,
    end: NodeId,
    attributes: EdgeAttributes,
    geometry: Option<Vec<GeoPoint>>,
    distance: Option<Distance<Meters>>,
    one_way: bool,
}

impl NewEdge {
    pub fn new(start: NodeId, end: NodeId, attributes: EdgeAttributes) -> Self {
        NewEdge {
            start,
            end,
            attributes,
            geometry: None,
            distance: None,
            one_way: false,
        }
    }

    /// Intermediate shape of the edge, including both end points.
    pub fn with_geometry(mut self, geometry: Vec<GeoPoint>) -> Self {
        self.geometry = Some(geometry);
        self
    }

    /// Physical length as measured by the data source. Defaults to the geometry length.
    pub fn with_distance(mut self, distance: Distance<Meters>) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn one_way(mut self, one_way: bool) -> Self {
        self.one_way = one_way;
        self
    }
}

#[derive(Default)]
pub struct GraphBuilder {
    graph: RoadGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder::default()
    }

    pub fn add_node(&mut self, coordinates: GeoPoint) -> NodeId {
        let node_id = self.graph.nodes.len();
        self.graph.nodes.push(coordinates);
        self.graph.adjacency_list.push(vec![]);
        node_id
    }

    pub fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    pub fn add_edge(&mut self, edge: NewEdge) -> EdgeId {
        let edge_id = self.graph.edges.len();

        let geometry = match edge.geometry {
            Some(geometry) if geometry.len() >= 2 => geometry,
            _ => vec![self.graph.nodes[edge.start], self.graph.nodes[edge.end]],
        };
        let distance = edge
            .distance
            .unwrap_or_else(|| compute_geometry_distance(&geometry));

        self.graph.edges.push(GraphEdge::new(
            edge_id,
            edge.start,
            edge.end,
            distance,
            edge.attributes,
            edge.one_way,
        ));
        self.graph.geometry.push(geometry);

        self.graph.adjacency_list[edge.start].push(edge_id);
        if edge.end != edge.start {
            self.graph.adjacency_list[edge.end].push(edge_id);
        }

        edge_id
    }

    pub fn build(self) -> RoadGraph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{graph::EdgeDirection, meters};

    #[test]
    fn builds_undirected_adjacency() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node(GeoPoint::new(35.0, 135.0));
        let b = builder.add_node(GeoPoint::new(35.001, 135.0));
        let edge = builder.add_edge(NewEdge::new(a, b, EdgeAttributes::default()));
        let graph = builder.build();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node_edges(a), &[edge]);
        assert_eq!(graph.node_edges(b), &[edge]);
        assert_eq!(graph.edge_direction(edge, a), EdgeDirection::Forward);
        assert_eq!(graph.edge_direction(edge, b), EdgeDirection::Backward);
        assert_eq!(graph.edge_geometry(edge).len(), 2);
    }

    #[test]
    fn distance_defaults_to_geometry_length() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node(GeoPoint::new(35.0, 135.0));
        let b = builder.add_node(GeoPoint::new(35.001, 135.0));
        let measured = builder.add_edge(NewEdge::new(a, b, EdgeAttributes::default()));
        let explicit = builder.add_edge(
            NewEdge::new(a, b, EdgeAttributes::default()).with_distance(meters!(250)),
        );
        let graph = builder.build();

        let expected = GeoPoint::new(35.0, 135.0).haversine_distance(&GeoPoint::new(35.001, 135.0));
        assert_eq!(graph.edge(measured).distance(), expected);
        assert_eq!(graph.edge(explicit).distance(), meters!(250));
        assert_eq!(graph.total_distance(), expected + meters!(250));
    }

    #[test]
    fn one_way_edges_are_only_traversable_forward() {
        let mut builder = GraphBuilder::new();
        let a = builder.add_node(GeoPoint::new(35.0, 135.0));
        let b = builder.add_node(GeoPoint::new(35.001, 135.0));
        let edge = builder.add_edge(NewEdge::new(a, b, EdgeAttributes::default()).one_way(true));
        let graph = builder.build();

        assert!(graph.edge(edge).is_traversable(EdgeDirection::Forward));
        assert!(!graph.edge(edge).is_traversable(EdgeDirection::Backward));
    }
}
