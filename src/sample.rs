use geojson::FeatureCollection;
use roadnet_core::prelude::*;
use serde_json::json;

use crate::{FieldNames, load_network};

/// GeoJSON node and edge collections of the built-in three-node network
/// around Central, Hong Kong.
///
/// # Errors
///
/// Returns an error if the embedded collections fail to deserialize
pub fn sample_collections() -> Result<(FeatureCollection, FeatureCollection), Error> {
    let nodes = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"osmid": "100"}, "geometry": {"type": "Point", "coordinates": [114.1589, 22.2822]}},
            {"type": "Feature", "properties": {"osmid": "200"}, "geometry": {"type": "Point", "coordinates": [114.1629, 22.2799]}},
            {"type": "Feature", "properties": {"osmid": "300"}, "geometry": {"type": "Point", "coordinates": [114.1655, 22.2850]}}
        ]
    });
    let edges = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"u": "100", "v": "200", "length": 400, "bc": 0.12},
             "geometry": {"type": "LineString", "coordinates": [[114.1589, 22.2822], [114.1629, 22.2799]]}},
            {"type": "Feature", "properties": {"u": "200", "v": "300", "length": 520, "bc": 0.30},
             "geometry": {"type": "LineString", "coordinates": [[114.1629, 22.2799], [114.1655, 22.2850]]}},
            {"type": "Feature", "properties": {"u": "100", "v": "300", "length": 700, "bc": 0.05},
             "geometry": {"type": "LineString", "coordinates": [[114.1589, 22.2822], [114.1655, 22.2850]]}}
        ]
    });

    Ok((serde_json::from_value(nodes)?, serde_json::from_value(edges)?))
}

/// The built-in three-node sample network
///
/// # Errors
///
/// Returns an error if the embedded collections fail to deserialize
pub fn sample_network() -> Result<RoadNetwork, Error> {
    let (nodes, edges) = sample_collections()?;
    Ok(load_network(&nodes, &edges, &FieldNames::default()))
}

/// GeoJSON node and edge collections of the built-in three-station transit
/// sample. Stations carry a betweenness `bc` property; the lines have no
/// `length`, so it is derived from their geometry.
///
/// # Errors
///
/// Returns an error if the embedded collections fail to deserialize
pub fn mtr_sample_collections() -> Result<(FeatureCollection, FeatureCollection), Error> {
    let nodes = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"osmid": "A", "bc": 0.05}, "geometry": {"type": "Point", "coordinates": [114.17, 22.30]}},
            {"type": "Feature", "properties": {"osmid": "B", "bc": 0.20}, "geometry": {"type": "Point", "coordinates": [114.19, 22.305]}},
            {"type": "Feature", "properties": {"osmid": "C", "bc": 0.10}, "geometry": {"type": "Point", "coordinates": [114.18, 22.315]}}
        ]
    });
    let edges = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"u": "A", "v": "B"},
             "geometry": {"type": "LineString", "coordinates": [[114.17, 22.30], [114.19, 22.305]]}},
            {"type": "Feature", "properties": {"u": "B", "v": "C"},
             "geometry": {"type": "LineString", "coordinates": [[114.19, 22.305], [114.18, 22.315]]}}
        ]
    });

    Ok((serde_json::from_value(nodes)?, serde_json::from_value(edges)?))
}

/// The built-in three-station transit sample network
///
/// # Errors
///
/// Returns an error if the embedded collections fail to deserialize
pub fn mtr_sample_network() -> Result<RoadNetwork, Error> {
    let (nodes, edges) = mtr_sample_collections()?;
    Ok(load_network(&nodes, &edges, &FieldNames::default()))
}
