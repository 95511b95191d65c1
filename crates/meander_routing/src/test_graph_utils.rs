#[cfg(test)]
pub mod test_graph {
    use crate::{
        geopoint::GeoPoint,
        graph::Graph,
        landmarks::{landmark::Landmark, landmark_index::LandmarkIndex},
        meters,
        properties::{
            attribute_stats::AttributeStats, criterion::Criterion,
            edge_attributes::EdgeAttributes,
        },
        road_graph::{GraphBuilder, NewEdge, RoadGraph},
        types::{EdgeId, NodeId},
        weights::RawWeights,
    };

    #[derive(Clone, Copy, Debug)]
    pub enum ScenarioNode {
        A = 0,
        B = 1,
        C = 2,
        D = 3,
    }

    impl From<ScenarioNode> for usize {
        fn from(value: ScenarioNode) -> Self {
            value as usize
        }
    }

    pub const SHRINE: (f64, f64) = (35.0018, 135.69995);

    /// Graph, statistics and landmark index as loaded by the engine.
    pub struct TestNetwork {
        pub graph: RoadGraph,
        pub stats: AttributeStats,
        pub landmarks: LandmarkIndex,
    }

    impl TestNetwork {
        pub fn new(graph: RoadGraph, landmarks: Vec<Landmark>) -> Self {
            let stats = AttributeStats::from_attributes(
                graph.edges().iter().map(|edge| edge.attributes()),
            );
            let landmarks = LandmarkIndex::build(&graph, landmarks, meters!(50));

            TestNetwork {
                graph,
                stats,
                landmarks,
            }
        }

        /// ```text
        ///         D
        ///       /   \
        ///  (green)   C
        ///       \   /
        ///         B
        ///         |
        ///         A
        /// ```
        ///
        /// A-B is 100 m. B-D is 500 m and green, with a shrine next to it.
        /// B-C-D is 300 m with hardly any green.
        pub fn scenario() -> Self {
            Self::new(scenario_graph(), vec![shrine()])
        }

        /// Three nodes joined by two one-way edges, walkable from node 0 to node 2 only.
        pub fn one_way_street() -> Self {
            let mut builder = GraphBuilder::new();
            let nodes: Vec<NodeId> = (0..3)
                .map(|i| builder.add_node(GeoPoint::new(35.0 + 0.001 * i as f64, 135.0)))
                .collect();

            for pair in nodes.windows(2) {
                builder.add_edge(
                    NewEdge::new(pair[0], pair[1], EdgeAttributes::uniform(0.5)).one_way(true),
                );
            }

            Self::new(builder.build(), vec![])
        }

        pub fn node(&self, node: ScenarioNode) -> NodeId {
            node.into()
        }

        pub fn node_coordinates(&self, node: ScenarioNode) -> GeoPoint {
            *self.graph.node_geometry(node.into())
        }

        pub fn edge_between(&self, a: ScenarioNode, b: ScenarioNode) -> EdgeId {
            let (a, b): (NodeId, NodeId) = (a.into(), b.into());

            self.graph
                .node_edges_iter(a)
                .find(|&edge_id| self.graph.edge(edge_id).adj_node(a) == b)
                .unwrap_or_else(|| panic!("No edge between {} and {}", a, b))
        }
    }

    pub fn scenario_graph() -> RoadGraph {
        let mut builder = GraphBuilder::new();

        let a = builder.add_node(GeoPoint::new(35.0000, 135.7000));
        let b = builder.add_node(GeoPoint::new(35.0009, 135.7000));
        let c = builder.add_node(GeoPoint::new(35.0018, 135.7020));
        let d = builder.add_node(GeoPoint::new(35.0027, 135.7000));

        let plain = EdgeAttributes::uniform(0.5).with(Criterion::GreenIndex, 0.1);

        builder.add_edge(NewEdge::new(a, b, EdgeAttributes::uniform(0.5)).with_distance(meters!(100)));
        builder.add_edge(NewEdge::new(b, c, plain).with_distance(meters!(150)));
        builder.add_edge(NewEdge::new(c, d, plain).with_distance(meters!(150)));
        builder.add_edge(
            NewEdge::new(b, d, EdgeAttributes::uniform(0.5).with(Criterion::GreenIndex, 0.9))
                .with_distance(meters!(500)),
        );

        builder.build()
    }

    pub fn shrine() -> Landmark {
        Landmark::new(
            "Fushimi Shrine",
            "A small neighborhood shrine",
            Some(String::from("shrine")),
            GeoPoint::new(SHRINE.0, SHRINE.1),
        )
    }

    pub fn length_weights() -> RawWeights {
        RawWeights::default().with_length(1.0)
    }

    pub fn green_weights() -> RawWeights {
        RawWeights::default()
            .with_length(0.1)
            .with_criterion(Criterion::GreenIndex, 1.0)
    }

    /// `size` x `size` grid with 100 m blocks and varying attributes.
    pub fn grid_graph(size: usize) -> RoadGraph {
        let mut builder = GraphBuilder::new();
        let step = 0.0009;

        for row in 0..size {
            for col in 0..size {
                builder.add_node(GeoPoint::new(
                    35.0 + row as f64 * step,
                    135.7 + col as f64 * step,
                ));
            }
        }

        for row in 0..size {
            for col in 0..size {
                let node = row * size + col;
                let attributes = EdgeAttributes::uniform(((row * 7 + col * 3) % 10) as f64 / 10.0);
                if col + 1 < size {
                    builder.add_edge(NewEdge::new(node, node + 1, attributes));
                }
                if row + 1 < size {
                    builder.add_edge(NewEdge::new(node, node + size, attributes));
                }
            }
        }

        builder.build()
    }
}
