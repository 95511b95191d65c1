use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use comfy_table::Table;
use meander_routing::{
    config::EngineConfig, graph::Graph, meander::Meander, properties::criterion::Criterion,
};

#[derive(Args)]
pub struct StatsArgs {
    /// GeoJSON network file
    #[arg(short, long)]
    network: PathBuf,
}

pub fn run(args: StatsArgs) -> Result<(), anyhow::Error> {
    let meander = Meander::from_geojson_file(&args.network, EngineConfig::from_env()?)
        .with_context(|| format!("Failed to load {}", args.network.display()))?;
    let graph = meander.graph();

    let mut summary = Table::new();
    summary
        .set_header(vec!["Nodes", "Edges", "Landmarks", "Total length (km)"])
        .add_row(vec![
            graph.node_count().to_string(),
            graph.edge_count().to_string(),
            meander.landmarks().landmarks().len().to_string(),
            format!("{:.2}", graph.total_distance().value() / 1000.0),
        ]);
    println!("{summary}");

    let mut attributes = Table::new();
    attributes.set_header(vec!["Attribute", "Min", "Max"]);
    for criterion in Criterion::ALL {
        let range = meander.stats().range(criterion);
        attributes.add_row(vec![
            criterion.property_name().to_string(),
            format!("{:.3}", range.min),
            format!("{:.3}", range.max),
        ]);
    }
    println!("{attributes}");

    Ok(())
}
