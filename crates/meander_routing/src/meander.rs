use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::{
    config::EngineConfig,
    error::{LoadError, RouteError},
    geopoint::GeoPoint,
    landmarks::landmark_index::LandmarkIndex,
    location_index::LocationIndex,
    network_loader::{self, Network},
    properties::attribute_stats::AttributeStats,
    road_graph::RoadGraph,
    routing::{
        dijkstra::Dijkstra, route_result::RouteResult, routing_path_builder::build_route_result,
        routing_request::RoutingRequest, shortest_path_algorithm::CalcPath,
    },
    snap::Snap,
    stopwatch::Stopwatch,
    weighting::PreferenceWeighting,
    weights::WeightVector,
};

/// A loaded walking network, ready to answer route requests.
///
/// Immutable once built; requests only borrow it, so one instance can serve
/// any number of threads.
pub struct Meander {
    graph: RoadGraph,
    index: LocationIndex,
    landmarks: LandmarkIndex,
    stats: AttributeStats,
    config: EngineConfig,
}

impl Meander {
    pub fn new(network: Network, config: EngineConfig) -> Self {
        let Network { graph, landmarks } = network;

        let index = LocationIndex::build_from_graph(&graph);
        let landmarks = LandmarkIndex::build(&graph, landmarks, config.landmark_radius());
        let stats =
            AttributeStats::from_attributes(graph.edges().iter().map(|edge| edge.attributes()));

        info!("Network ready, attribute ranges {:?}", stats);

        Meander {
            graph,
            index,
            landmarks,
            stats,
            config,
        }
    }

    pub fn from_geojson_file(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self, LoadError> {
        Ok(Meander::new(network_loader::read_network_file(path)?, config))
    }

    pub fn from_geojson_str(text: &str, config: EngineConfig) -> Result<Self, LoadError> {
        Ok(Meander::new(network_loader::parse_network(text)?, config))
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    pub fn landmarks(&self) -> &LandmarkIndex {
        &self.landmarks
    }

    pub fn stats(&self) -> &AttributeStats {
        &self.stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snap(&self, coordinates: &GeoPoint) -> Result<Snap, RouteError> {
        if !coordinates.is_valid() {
            return Err(RouteError::InvalidCoordinate(format!(
                "{} is outside WGS84 bounds",
                coordinates
            )));
        }

        self.index
            .snap(&self.graph, coordinates, self.config.max_snap_distance())
    }

    pub fn route(&self, request: &RoutingRequest) -> Result<RouteResult, RouteError> {
        let weights = WeightVector::normalize(&request.weights, self.config.landmark_weight)?;
        debug!("Normalized weights {:?}", weights);

        let snap_stopwatch = Stopwatch::new("route/snap");
        let start = self.snap(&request.start)?;
        let end = self.snap(&request.end)?;
        snap_stopwatch.report();

        let requested_landmarks = self.landmarks.resolve(&request.landmarks);
        let weighting =
            PreferenceWeighting::new(weights, &self.stats, &self.landmarks, requested_landmarks);

        let budget = self.config.search_budget(request.options.as_ref());

        let path = Dijkstra::new(&self.graph).calc_path(
            &self.graph,
            &weighting,
            start.node_id,
            end.node_id,
            &budget,
        )?;

        let build_stopwatch = Stopwatch::new("route/build");
        let result = build_route_result(
            &self.graph,
            &self.landmarks,
            weighting.requested_landmarks(),
            &path.edges,
            (start, end),
            path.nodes_expanded,
        );
        build_stopwatch.report();

        debug!(
            "Route found: {} edges, {}, {} landmarks, search took {:?}",
            result.edges().len(),
            result.distance(),
            result.landmarks().len(),
            path.duration
        );

        Ok(result)
    }

    /// Answers independent requests in parallel, results in request order.
    pub fn route_batch(&self, requests: &[RoutingRequest]) -> Vec<Result<RouteResult, RouteError>> {
        requests
            .par_iter()
            .map(|request| self.route(request))
            .collect()
    }
}
