use std::{fs, path::Path};

use fxhash::FxHashMap;
use geojson::{Feature, GeoJson, JsonValue, Value};
use tracing::info;

use crate::{
    error::LoadError,
    geopoint::GeoPoint,
    landmarks::landmark::Landmark,
    meters,
    properties::{criterion::Criterion, edge_attributes::EdgeAttributes},
    road_graph::{GraphBuilder, NewEdge, RoadGraph},
    stopwatch::Stopwatch,
    types::NodeId,
};

/// A walking network as exported by the geographic data store.
pub struct Network {
    pub graph: RoadGraph,
    pub landmarks: Vec<Landmark>,
}

pub fn read_network_file(path: impl AsRef<Path>) -> Result<Network, LoadError> {
    info!("Reading network from {}", path.as_ref().display());
    let text = fs::read_to_string(path)?;
    parse_network(&text)
}

pub fn parse_network(text: &str) -> Result<Network, LoadError> {
    network_from_geojson(text.parse::<GeoJson>()?)
}

/// Builds a network from a feature collection of `LineString` edges and `Point` landmarks.
pub fn network_from_geojson(geojson: GeoJson) -> Result<Network, LoadError> {
    let stopwatch = Stopwatch::new("network/load");

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(LoadError::NotAFeatureCollection);
    };

    let mut builder = GraphBuilder::new();
    let mut node_ids: FxHashMap<u64, NodeId> = FxHashMap::default();
    let mut landmarks: Vec<Landmark> = Vec::new();
    let mut edge_count = 0;

    for (index, feature) in collection.features.iter().enumerate() {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(LoadError::UnsupportedGeometry { feature: index })?;

        match &geometry.value {
            Value::LineString(positions) => {
                add_edge(&mut builder, &mut node_ids, index, feature, positions)?;
                edge_count += 1;
            }
            Value::Point(position) => landmarks.push(parse_landmark(index, feature, position)?),
            _ => return Err(LoadError::UnsupportedGeometry { feature: index }),
        }
    }

    if edge_count == 0 {
        return Err(LoadError::EmptyNetwork);
    }

    info!(
        "Loaded network with {} nodes, {} edges and {} landmarks",
        builder.node_count(),
        edge_count,
        landmarks.len()
    );
    stopwatch.report();

    Ok(Network {
        graph: builder.build(),
        landmarks,
    })
}

fn add_edge(
    builder: &mut GraphBuilder,
    node_ids: &mut FxHashMap<u64, NodeId>,
    index: usize,
    feature: &Feature,
    positions: &[Vec<f64>],
) -> Result<(), LoadError> {
    if positions.len() < 2 {
        return Err(LoadError::DegenerateEdge { feature: index });
    }

    let geometry = positions
        .iter()
        .map(|position| parse_position(index, position))
        .collect::<Result<Vec<GeoPoint>, LoadError>>()?;

    let source = u64_property(index, feature, "source")?;
    let target = u64_property(index, feature, "target")?;

    let mut attributes = EdgeAttributes::default();
    for criterion in Criterion::ALL {
        attributes.set(
            criterion,
            f64_property(index, feature, criterion.property_name())?,
        );
    }

    let first = geometry[0];
    let last = geometry[geometry.len() - 1];
    let start = *node_ids
        .entry(source)
        .or_insert_with(|| builder.add_node(first));
    let end = *node_ids
        .entry(target)
        .or_insert_with(|| builder.add_node(last));

    let mut edge = NewEdge::new(start, end, attributes)
        .with_geometry(geometry)
        .one_way(optional_bool_property(index, feature, "oneway")?.unwrap_or(false));

    if let Some(length) = optional_f64_property(index, feature, "length")? {
        if length < 0.0 {
            return Err(LoadError::InvalidProperty {
                feature: index,
                property: "length",
            });
        }
        edge = edge.with_distance(meters!(length));
    }

    builder.add_edge(edge);

    Ok(())
}

fn parse_landmark(index: usize, feature: &Feature, position: &[f64]) -> Result<Landmark, LoadError> {
    let name = optional_str_property(index, feature, "name")?.ok_or(LoadError::InvalidProperty {
        feature: index,
        property: "name",
    })?;
    let description = optional_str_property(index, feature, "description")?.unwrap_or("");
    let kind = optional_str_property(index, feature, "kind")?.map(String::from);

    Ok(Landmark::new(
        name,
        description,
        kind,
        parse_position(index, position)?,
    ))
}

fn parse_position(index: usize, position: &[f64]) -> Result<GeoPoint, LoadError> {
    match position {
        [lng, lat, ..] => GeoPoint::try_new(*lat, *lng)
            .map_err(|_| LoadError::InvalidCoordinate { feature: index }),
        _ => Err(LoadError::InvalidCoordinate { feature: index }),
    }
}

fn property<'a>(feature: &'a Feature, property: &str) -> Option<&'a JsonValue> {
    feature.property(property).filter(|value| !value.is_null())
}

fn invalid(index: usize, property: &'static str) -> LoadError {
    LoadError::InvalidProperty {
        feature: index,
        property,
    }
}

fn u64_property(index: usize, feature: &Feature, name: &'static str) -> Result<u64, LoadError> {
    property(feature, name)
        .and_then(JsonValue::as_u64)
        .ok_or_else(|| invalid(index, name))
}

fn f64_property(index: usize, feature: &Feature, name: &'static str) -> Result<f64, LoadError> {
    optional_f64_property(index, feature, name)?.ok_or_else(|| invalid(index, name))
}

fn optional_f64_property(
    index: usize,
    feature: &Feature,
    name: &'static str,
) -> Result<Option<f64>, LoadError> {
    property(feature, name)
        .map(|value| {
            value
                .as_f64()
                .filter(|value| value.is_finite())
                .ok_or_else(|| invalid(index, name))
        })
        .transpose()
}

fn optional_bool_property(
    index: usize,
    feature: &Feature,
    name: &'static str,
) -> Result<Option<bool>, LoadError> {
    property(feature, name)
        .map(|value| value.as_bool().ok_or_else(|| invalid(index, name)))
        .transpose()
}

fn optional_str_property<'a>(
    index: usize,
    feature: &'a Feature,
    name: &'static str,
) -> Result<Option<&'a str>, LoadError> {
    property(feature, name)
        .map(|value| value.as_str().ok_or_else(|| invalid(index, name)))
        .transpose()
}
