use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use meander_routing::{
    config::EngineConfig,
    geopoint::GeoPoint,
    meander::Meander,
    routing::{
        route_result::{RouteLandmark, RouteResult},
        routing_request::RoutingRequest,
    },
    weights::RawWeights,
};
use serde::Serialize;
use tracing::info;

use crate::parsers;

#[derive(Args)]
pub struct RouteArgs {
    /// GeoJSON network file
    #[arg(short, long)]
    network: PathBuf,

    /// Start location as `lat,lon`
    #[arg(short, long, value_parser = parsers::parse_location)]
    start: GeoPoint,

    /// End location as `lat,lon`
    #[arg(short, long, value_parser = parsers::parse_location)]
    end: GeoPoint,

    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    weight_length: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    weight_green_index: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    weight_water_index: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    weight_shade_index: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    weight_slope_index: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    weight_road_safety: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    weight_isolation: f64,

    /// Landmark name or kind to walk by, repeatable
    #[arg(short, long = "landmark")]
    landmarks: Vec<String>,

    /// Maximum number of nodes the search may expand, 0 for no limit
    #[arg(long)]
    max_expansions: Option<usize>,
}

impl RouteArgs {
    fn weights(&self) -> RawWeights {
        RawWeights {
            weight_length: self.weight_length,
            weight_green_index: self.weight_green_index,
            weight_water_index: self.weight_water_index,
            weight_shade_index: self.weight_shade_index,
            weight_slope_index: self.weight_slope_index,
            weight_road_safety: self.weight_road_safety,
            weight_isolation: self.weight_isolation,
        }
    }
}

#[derive(Serialize)]
struct RouteOutput<'a> {
    distance_in_meter: f64,
    walking_duration_in_minutes: u64,
    nodes_expanded: usize,
    landmarks: &'a [RouteLandmark],
    path: geojson::Feature,
}

impl<'a> From<&'a RouteResult> for RouteOutput<'a> {
    fn from(result: &'a RouteResult) -> Self {
        RouteOutput {
            distance_in_meter: result.distance().value(),
            walking_duration_in_minutes: result.walking_duration_minutes(),
            nodes_expanded: result.nodes_expanded(),
            landmarks: result.landmarks(),
            path: result.to_feature(),
        }
    }
}

pub fn run(args: RouteArgs) -> Result<(), anyhow::Error> {
    let mut config = EngineConfig::from_env()?;
    if let Some(max_expansions) = args.max_expansions {
        config.max_expansions = Some(max_expansions).filter(|&max_expansions| max_expansions > 0);
    }

    let meander = Meander::from_geojson_file(&args.network, config)
        .with_context(|| format!("Failed to load {}", args.network.display()))?;

    let request = RoutingRequest::new(args.start, args.end, args.weights())
        .with_landmarks(args.landmarks.iter().cloned());

    info!("Searching route from {} to {}", request.start, request.end);
    let result = meander.route(&request)?;

    println!("{}", serde_json::to_string_pretty(&RouteOutput::from(&result))?);

    Ok(())
}
