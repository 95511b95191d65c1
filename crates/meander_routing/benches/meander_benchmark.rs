use criterion::{Criterion, black_box, criterion_group, criterion_main};

use meander_routing::{
    config::EngineConfig,
    geopoint::GeoPoint,
    graph::Graph,
    landmarks::landmark::Landmark,
    meander::Meander,
    network_loader::Network,
    properties::{criterion::Criterion as PreferenceCriterion, edge_attributes::EdgeAttributes},
    road_graph::{GraphBuilder, NewEdge},
    routing::routing_request::RoutingRequest,
    weights::RawWeights,
};

const GRID_SIZE: usize = 100;
const STEP: f64 = 0.0009;

fn grid_network() -> Network {
    let mut builder = GraphBuilder::new();

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            builder.add_node(GeoPoint::new(
                35.0 + row as f64 * STEP,
                135.7 + col as f64 * STEP,
            ));
        }
    }

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let node = row * GRID_SIZE + col;
            let green = ((row * 31 + col * 17) % 100) as f64 / 100.0;
            let attributes = EdgeAttributes::uniform(0.5).with(PreferenceCriterion::GreenIndex, green);

            if col + 1 < GRID_SIZE {
                builder.add_edge(NewEdge::new(node, node + 1, attributes));
            }
            if row + 1 < GRID_SIZE {
                builder.add_edge(NewEdge::new(node, node + GRID_SIZE, attributes));
            }
        }
    }

    let landmarks = (0..GRID_SIZE / 10)
        .map(|i| {
            Landmark::new(
                format!("Shrine {}", i),
                "",
                Some(String::from("shrine")),
                GeoPoint::new(35.0 + i as f64 * 10.0 * STEP, 135.7 + i as f64 * 9.0 * STEP),
            )
        })
        .collect();

    Network {
        graph: builder.build(),
        landmarks,
    }
}

fn route_benchmark(c: &mut Criterion) {
    let meander = Meander::new(grid_network(), EngineConfig::default());
    let start = *meander.graph().node_geometry(0);
    let end = *meander.graph().node_geometry(meander.graph().node_count() - 1);

    let length = RoutingRequest::new(start, end, RawWeights::default().with_length(1.0));
    let green = RoutingRequest::new(
        start,
        end,
        RawWeights::default()
            .with_length(0.2)
            .with_criterion(PreferenceCriterion::GreenIndex, 1.0),
    )
    .with_landmarks(["shrine"]);

    c.bench_function("route length only", |b| {
        b.iter(|| black_box(meander.route(&length)))
    });

    c.bench_function("route green with landmarks", |b| {
        b.iter(|| black_box(meander.route(&green)))
    });

    let batch: Vec<RoutingRequest> = (0..16).map(|_| green.clone()).collect();
    c.bench_function("route batch of 16", |b| {
        b.iter(|| black_box(meander.route_batch(&batch)))
    });
}

criterion_group!(benches, route_benchmark);
criterion_main!(benches);
