use fxhash::FxHashSet;

use crate::constants::{MAX_WEIGHT, WEIGHT_PRECISION};
use crate::graph::{EdgeDirection, GraphEdge};
use crate::landmarks::landmark_index::LandmarkIndex;
use crate::properties::attribute_stats::AttributeStats;
use crate::properties::criterion::{Criterion, Polarity};
use crate::types::LandmarkId;
use crate::weights::WeightVector;

/// Integer edge cost, in thousandths of a weighted meter.
pub type Weight = u64;

pub trait Weighting {
    fn can_access_edge(&self, edge: &GraphEdge) -> bool {
        self.calc_edge_weight(edge, EdgeDirection::Forward) != MAX_WEIGHT
            || self.calc_edge_weight(edge, EdgeDirection::Backward) != MAX_WEIGHT
    }

    /// Cost of traversing `edge` in `direction`, or [`MAX_WEIGHT`] when it cannot be traversed.
    fn calc_edge_weight(&self, edge: &GraphEdge, direction: EdgeDirection) -> Weight;
}

pub(crate) fn to_weight(cost: f64) -> Weight {
    (cost * WEIGHT_PRECISION).round() as Weight
}

/// Blends the environmental attributes of an edge with walker preferences.
///
/// Every criterion contributes per meter walked:
///
/// `cost = length * (w_length + sum(w_c * term_c)) - w_landmark * length`
///
/// where `term_c` is the normalized attribute for criteria where more is worse,
/// and one minus it for criteria where more is better. The landmark discount only
/// applies to edges near a requested landmark and the result never drops below zero.
pub struct PreferenceWeighting<'a> {
    weights: WeightVector,
    stats: &'a AttributeStats,
    landmarks: &'a LandmarkIndex,
    requested_landmarks: FxHashSet<LandmarkId>,
}

impl<'a> PreferenceWeighting<'a> {
    pub fn new(
        weights: WeightVector,
        stats: &'a AttributeStats,
        landmarks: &'a LandmarkIndex,
        requested_landmarks: FxHashSet<LandmarkId>,
    ) -> Self {
        PreferenceWeighting {
            weights,
            stats,
            landmarks,
            requested_landmarks,
        }
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn requested_landmarks(&self) -> &FxHashSet<LandmarkId> {
        &self.requested_landmarks
    }

    /// Cost of the edge in weighted meters, before integer conversion.
    pub fn edge_cost(&self, edge: &GraphEdge) -> f64 {
        let length = edge.distance().value();

        let blend = Criterion::ALL
            .iter()
            .fold(self.weights.length(), |blend, &criterion| {
                let weight = self.weights.criterion(criterion);
                if weight == 0.0 {
                    return blend;
                }

                let normalized = self
                    .stats
                    .normalize(criterion, edge.attributes().get(criterion));
                let term = match criterion.polarity() {
                    Polarity::HigherIsBetter => 1.0 - normalized,
                    Polarity::HigherIsWorse => normalized,
                };

                blend + weight * term
            });

        let mut cost = length * blend;

        if self
            .landmarks
            .is_near_any(edge.id(), &self.requested_landmarks)
        {
            cost -= self.weights.landmark() * length;
        }

        cost.max(0.0)
    }
}

impl Weighting for PreferenceWeighting<'_> {
    fn calc_edge_weight(&self, edge: &GraphEdge, direction: EdgeDirection) -> Weight {
        if !edge.is_traversable(direction) {
            return MAX_WEIGHT;
        }

        to_weight(self.edge_cost(edge))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::Graph,
        test_graph_utils::test_graph::{ScenarioNode, TestNetwork, green_weights, length_weights},
        weights::RawWeights,
    };

    #[test]
    fn costs_are_never_negative() {
        let network = TestNetwork::scenario();
        let everything: FxHashSet<LandmarkId> = (0..network.landmarks.landmarks().len()).collect();

        let raws = [
            length_weights(),
            green_weights(),
            RawWeights::default().with_criterion(Criterion::Isolation, 1.0),
            RawWeights::default().with_criterion(Criterion::ShadeIndex, 5.0),
        ];

        for raw in raws {
            for landmark_weight in [0.0, 0.2, 10.0] {
                let weights = WeightVector::normalize(&raw, landmark_weight).unwrap();
                for requested in [FxHashSet::default(), everything.clone()] {
                    let weighting = PreferenceWeighting::new(
                        weights,
                        &network.stats,
                        &network.landmarks,
                        requested,
                    );
                    for edge in network.graph.edges() {
                        assert!(weighting.edge_cost(edge) >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn length_only_weighting_costs_physical_length() {
        let network = TestNetwork::scenario();
        let weights = WeightVector::normalize(&length_weights(), 0.0).unwrap();
        let weighting =
            PreferenceWeighting::new(weights, &network.stats, &network.landmarks, FxHashSet::default());

        for edge in network.graph.edges() {
            assert_eq!(
                weighting.calc_edge_weight(edge, EdgeDirection::Forward),
                to_weight(edge.distance().value())
            );
        }
    }

    #[test]
    fn greener_edges_cost_less_when_green_is_preferred() {
        let network = TestNetwork::scenario();
        let weights = WeightVector::normalize(&green_weights(), 0.2).unwrap();
        let weighting =
            PreferenceWeighting::new(weights, &network.stats, &network.landmarks, FxHashSet::default());

        let green = network.edge_between(ScenarioNode::B, ScenarioNode::D);
        let plain = network.edge_between(ScenarioNode::B, ScenarioNode::C);

        let per_meter = |edge_id| {
            let edge = network.graph.edge(edge_id);
            weighting.edge_cost(edge) / edge.distance().value()
        };
        assert!(per_meter(green) < per_meter(plain));
    }

    #[test]
    fn requested_landmark_discounts_nearby_edges() {
        let network = TestNetwork::scenario();
        let weights = WeightVector::normalize(&length_weights(), 0.2).unwrap();
        let shrine = network.landmarks.resolve(&["shrine"]);

        let plain =
            PreferenceWeighting::new(weights, &network.stats, &network.landmarks, FxHashSet::default());
        let biased = PreferenceWeighting::new(weights, &network.stats, &network.landmarks, shrine);

        let near = network.graph.edge(network.edge_between(ScenarioNode::B, ScenarioNode::D));
        let far = network.graph.edge(network.edge_between(ScenarioNode::A, ScenarioNode::B));

        assert!(biased.edge_cost(near) < plain.edge_cost(near));
        assert_eq!(biased.edge_cost(far), plain.edge_cost(far));
    }

    #[test]
    fn one_way_edges_cannot_be_walked_backward() {
        let network = TestNetwork::one_way_street();
        let weights = WeightVector::normalize(&length_weights(), 0.2).unwrap();
        let weighting =
            PreferenceWeighting::new(weights, &network.stats, &network.landmarks, FxHashSet::default());

        let edge = network.graph.edge(0);
        assert!(edge.is_one_way());
        assert_eq!(
            weighting.calc_edge_weight(edge, EdgeDirection::Backward),
            MAX_WEIGHT
        );
        assert!(weighting.can_access_edge(edge));
    }
}
