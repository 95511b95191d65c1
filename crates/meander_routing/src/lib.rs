pub mod config;
pub mod constants;
pub mod distance;
pub mod error;
pub mod geometry;
pub mod geopoint;
pub mod graph;
pub mod landmarks;
pub mod location_index;
pub mod meander;
pub mod network_loader;
pub mod properties;
pub mod road_graph;
pub mod routing;
pub mod snap;
pub mod snapshot;
pub mod stopwatch;
pub mod types;
pub mod weighting;
pub mod weights;

mod test_graph_utils;
