use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::debug;

use crate::{
    constants::{INVALID_EDGE, INVALID_NODE, MAX_WEIGHT},
    distance::{Distance, Meters},
    error::RouteError,
    graph::{EdgeDirection, Graph},
    stopwatch::Stopwatch,
    types::{EdgeId, NodeId},
    weighting::{Weight, Weighting},
};

use super::shortest_path_algorithm::{CalcPath, CalcPathResult, SearchBudget};

/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
struct HeapItem {
    node_id: NodeId,
    weight: Weight,
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip weight to make this a min-heap, lowest node id first on equal weight
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.node_id.cmp(&self.node_id))
    }
}

#[derive(Clone)]
struct NodeData {
    settled: bool,
    weight: Weight,
    parent: NodeId,
    edge_id: EdgeId, // Edge ID from parent to current node
    edge_distance: Distance<Meters>,
}

impl NodeData {
    fn new() -> Self {
        NodeData {
            settled: false,
            weight: MAX_WEIGHT,
            parent: INVALID_NODE,
            edge_id: INVALID_EDGE,
            edge_distance: Distance::zero(),
        }
    }
}

pub struct Dijkstra {
    heap: BinaryHeap<HeapItem>,
    data: Vec<NodeData>,
}

impl Dijkstra {
    pub fn new(graph: &impl Graph) -> Self {
        Dijkstra {
            heap: BinaryHeap::with_capacity(1024),
            data: vec![NodeData::new(); graph.node_count()],
        }
    }

    fn init(&mut self, start: NodeId) {
        self.heap.clear();
        self.data.fill(NodeData::new());

        self.data[start].weight = 0;
        self.heap.push(HeapItem {
            node_id: start,
            weight: 0,
        });
    }

    fn relax(
        &mut self,
        graph: &impl Graph,
        weighting: &impl Weighting,
        node_id: NodeId,
        weight: Weight,
    ) {
        for edge_id in graph.node_edges_iter(node_id) {
            let edge = graph.edge(edge_id);
            let adj_node = edge.adj_node(node_id);

            if self.data[adj_node].settled {
                continue;
            }

            let direction = graph.edge_direction(edge_id, node_id);
            let edge_weight = weighting.calc_edge_weight(edge, direction);

            if edge_weight == MAX_WEIGHT {
                continue;
            }

            let next_weight = weight.saturating_add(edge_weight);
            let adj_data = &mut self.data[adj_node];

            if next_weight < adj_data.weight {
                adj_data.weight = next_weight;
                adj_data.parent = node_id;
                adj_data.edge_id = edge_id;
                adj_data.edge_distance = edge.distance();

                self.heap.push(HeapItem {
                    node_id: adj_node,
                    weight: next_weight,
                });
            } else if next_weight == adj_data.weight && edge.distance() < adj_data.edge_distance {
                // Same weight, the queued item stays valid
                adj_data.parent = node_id;
                adj_data.edge_id = edge_id;
                adj_data.edge_distance = edge.distance();
            }
        }
    }

    /// Settles the queued nodes whose weight equals the end's, so that a zero-weight
    /// final edge from one of them can still win the shorter-edge tie-break. The end
    /// itself stays unsettled until then. Returns the number of nodes settled.
    fn settle_ties(
        &mut self,
        graph: &impl Graph,
        weighting: &impl Weighting,
        end: NodeId,
        end_weight: Weight,
        budget: &SearchBudget,
        nodes_expanded: usize,
    ) -> Result<usize, RouteError> {
        let mut settled = 0;

        while let Some(&HeapItem { node_id, weight }) = self.heap.peek() {
            if weight != end_weight {
                break;
            }
            self.heap.pop();

            if node_id == end || self.data[node_id].settled || weight > self.data[node_id].weight {
                continue;
            }

            budget.check(nodes_expanded + settled)?;

            self.data[node_id].settled = true;
            settled += 1;
            self.relax(graph, weighting, node_id, weight);
        }

        self.data[end].settled = true;

        Ok(settled)
    }

    fn build_path(&self, graph: &impl Graph, end: NodeId) -> Vec<(EdgeId, EdgeDirection)> {
        let mut edges: Vec<(EdgeId, EdgeDirection)> = Vec::with_capacity(32);

        let mut node = end;
        while self.data[node].parent != INVALID_NODE {
            let NodeData {
                parent, edge_id, ..
            } = self.data[node];

            edges.push((edge_id, graph.edge_direction(edge_id, parent)));
            node = parent;
        }

        edges.reverse();
        edges
    }
}

impl<G: Graph> CalcPath<G> for Dijkstra {
    fn calc_path(
        &mut self,
        graph: &G,
        weighting: &impl Weighting,
        start: NodeId,
        end: NodeId,
        budget: &SearchBudget,
    ) -> Result<CalcPathResult, RouteError> {
        let stopwatch = Stopwatch::new("dijkstra/calc_path");

        if start >= graph.node_count() || end >= graph.node_count() {
            return Err(RouteError::NoPathFound { start, end });
        }

        if start == end {
            return Ok(CalcPathResult {
                edges: vec![],
                weight: 0,
                nodes_expanded: 0,
                duration: stopwatch.elapsed(),
            });
        }

        self.init(start);

        let mut nodes_expanded = 0;
        let mut found = false;

        while let Some(HeapItem { node_id, weight }) = self.heap.pop() {
            // Already settled, or a stale entry superseded by a cheaper one
            if self.data[node_id].settled || weight > self.data[node_id].weight {
                continue;
            }

            budget.check(nodes_expanded)?;
            nodes_expanded += 1;

            if node_id == end {
                found = true;
                nodes_expanded +=
                    self.settle_ties(graph, weighting, end, weight, budget, nodes_expanded)?;
                break;
            }

            self.data[node_id].settled = true;
            self.relax(graph, weighting, node_id, weight);
        }

        debug!("Dijkstra nodes expanded: {}", nodes_expanded);
        stopwatch.report();

        if !found {
            return Err(RouteError::NoPathFound { start, end });
        }

        Ok(CalcPathResult {
            edges: self.build_path(graph, end),
            weight: self.data[end].weight,
            nodes_expanded,
            duration: stopwatch.elapsed(),
        })
    }
}
