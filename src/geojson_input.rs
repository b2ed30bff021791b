//! Conversion of GeoJSON node and edge collections into builder records

use std::collections::BTreeMap;

use geojson::{Feature, FeatureCollection, feature::Id};
use log::{debug, info};
use roadnet_core::loading::id_from_json;
use roadnet_core::prelude::*;
use serde_json::Value as JsonValue;

use crate::FieldNames;

/// Node records from `Point` features.
///
/// Features without a usable id or without point geometry are skipped.
/// Finite numeric properties other than the id fields become node
/// attributes.
pub fn nodes_from_geojson(collection: &FeatureCollection, fields: &FieldNames) -> Vec<NodeRecord> {
    let nodes: Vec<NodeRecord> = collection
        .features
        .iter()
        .filter_map(|feature| node_from_feature(feature, fields))
        .collect();

    let skipped = collection.features.len() - nodes.len();
    if skipped > 0 {
        debug!("Skipped {skipped} node features without an id or point geometry");
    }
    nodes
}

fn node_from_feature(feature: &Feature, fields: &FieldNames) -> Option<NodeRecord> {
    let id = first_id(feature, &fields.node_id).or_else(|| {
        feature.id.as_ref().and_then(|id| match id {
            Id::String(s) => id_from_json(&JsonValue::String(s.clone())),
            Id::Number(n) => id_from_json(&JsonValue::Number(n.clone())),
        })
    })?;

    match to_geo(feature)? {
        geo::Geometry::Point(point) => Some(NodeRecord {
            attributes: numeric_properties(feature, |name| fields.is_node_id_field(name)),
            ..NodeRecord::new(id, point.x(), point.y())
        }),
        _ => None,
    }
}

/// Edge records from `LineString` and `MultiLineString` features.
///
/// Endpoint ids are looked up through `fields`; a missing id is left empty
/// and the builder drops the edge. Other geometry types give an empty
/// geometry. Finite numeric properties other than the id and one-way
/// fields become edge attributes.
pub fn edges_from_geojson(collection: &FeatureCollection, fields: &FieldNames) -> Vec<EdgeRecord> {
    collection
        .features
        .iter()
        .map(|feature| edge_from_feature(feature, fields))
        .collect()
}

fn edge_from_feature(feature: &Feature, fields: &FieldNames) -> EdgeRecord {
    let geometry = match to_geo(feature) {
        Some(geo::Geometry::LineString(line)) => EdgeGeometry::from(&line),
        Some(geo::Geometry::MultiLineString(lines)) => EdgeGeometry::from(&lines),
        _ => EdgeGeometry::default(),
    };

    EdgeRecord {
        source: first_id(feature, &fields.source).unwrap_or_default(),
        target: first_id(feature, &fields.target).unwrap_or_default(),
        geometry,
        attributes: numeric_properties(feature, |name| fields.is_edge_key_field(name)),
        oneway: feature.property(&fields.oneway).is_some_and(is_oneway),
    }
}

fn numeric_properties(feature: &Feature, skip: impl Fn(&str) -> bool) -> BTreeMap<String, f64> {
    let Some(properties) = &feature.properties else {
        return BTreeMap::new();
    };
    properties
        .iter()
        .filter(|(name, _)| !skip(name))
        .filter_map(|(name, value)| {
            value
                .as_f64()
                .filter(|v| v.is_finite())
                .map(|v| (name.clone(), v))
        })
        .collect()
}

fn first_id(feature: &Feature, names: &[String]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| feature.property(name))
        .find_map(id_from_json)
}

fn to_geo(feature: &Feature) -> Option<geo::Geometry<f64>> {
    let geometry = feature.geometry.clone()?;
    geo::Geometry::<f64>::try_from(geometry).ok()
}

/// Builds a road network from GeoJSON node and edge collections
pub fn load_network(
    nodes: &FeatureCollection,
    edges: &FeatureCollection,
    fields: &FieldNames,
) -> RoadNetwork {
    info!(
        "Loading road network from {} node and {} edge features",
        nodes.features.len(),
        edges.features.len()
    );
    build_network(
        nodes_from_geojson(nodes, fields),
        edges_from_geojson(edges, fields),
    )
}

/// Parses GeoJSON `FeatureCollection` texts and builds a road network
///
/// # Errors
///
/// Returns an error if either text is not a valid `FeatureCollection`
pub fn load_network_from_str(
    nodes: &str,
    edges: &str,
    fields: &FieldNames,
) -> Result<RoadNetwork, Error> {
    let nodes: FeatureCollection = serde_json::from_str(nodes)?;
    let edges: FeatureCollection = serde_json::from_str(edges)?;
    Ok(load_network(&nodes, &edges, fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collection(value: JsonValue) -> FeatureCollection {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_node_ids_from_alternate_fields() {
        let nodes = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"osmid": 1}, "geometry": {"type": "Point", "coordinates": [114.0, 22.0]}},
                {"type": "Feature", "id": "n2", "properties": {}, "geometry": {"type": "Point", "coordinates": [114.1, 22.1]}},
                {"type": "Feature", "properties": {"id": "n3"}, "geometry": {"type": "Point", "coordinates": [114.2, 22.2]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [114.3, 22.3]}},
                {"type": "Feature", "properties": {"osmid": 5}, "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}}
            ]
        }));

        let records = nodes_from_geojson(&nodes, &FieldNames::default());
        let ids: Vec<&str> = records.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "n2", "n3"]);
        assert_eq!(records[0].lon, 114.0);
        assert_eq!(records[0].lat, 22.0);
    }

    #[test]
    fn test_node_properties_become_attributes() {
        let nodes = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"osmid": 7, "bc": 0.05, "name": "Central", "ridership": null},
                 "geometry": {"type": "Point", "coordinates": [114.17, 22.30]}},
                {"type": "Feature", "id": 8, "geometry": {"type": "Point", "coordinates": [114.19, 22.305]}}
            ]
        }));

        let records = nodes_from_geojson(&nodes, &FieldNames::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "7");
        assert_eq!(records[0].attributes.len(), 1);
        assert_eq!(records[0].attributes["bc"], 0.05);
        assert_eq!(records[1].id, "8");
        assert!(records[1].attributes.is_empty());
    }

    #[test]
    fn test_edges_from_features() {
        let edges = collection(json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"u": 1, "v": 2, "length": 10.5, "bc": 0.2, "name": "Queen's Road", "oneway": 1},
                 "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]]}},
                {"type": "Feature", "properties": {"from": "2", "to": "3"},
                 "geometry": {"type": "MultiLineString", "coordinates": [[[0.0, 0.001], [0.0, 0.002]], [[0.0, 0.003]]]}},
                {"type": "Feature", "properties": {"source": "3"},
                 "geometry": {"type": "LineString", "coordinates": [[0.0, 0.003], [0.0, 0.004]]}}
            ]
        }));

        let records = edges_from_geojson(&edges, &FieldNames::default());
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].source, "1");
        assert_eq!(records[0].target, "2");
        assert!(records[0].oneway);
        assert_eq!(records[0].attributes.len(), 2);
        assert_eq!(records[0].attributes["bc"], 0.2);

        assert_eq!(records[1].source, "2");
        assert!(!records[1].oneway);
        assert_eq!(records[1].geometry.to_line_string().0.len(), 3);

        assert_eq!(records[2].target, "");
    }

    #[test]
    fn test_load_network_from_str() {
        let nodes = r#"{"type": "FeatureCollection", "features": []}"#;
        let edges = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"u": "a", "v": "b", "oneway": "True"},
                 "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [0.0, 0.001]]}}
            ]
        }"#;

        let network = load_network_from_str(nodes, edges, &FieldNames::default()).unwrap();
        assert_eq!(network.adjacency_count(), 1);
        assert!(shortest_path(&network, "a", "b", "length").is_some());
        assert!(shortest_path(&network, "b", "a", "length").is_none());
    }

    #[test]
    fn test_load_network_from_invalid_text() {
        let result = load_network_from_str("not json", "{}", &FieldNames::default());
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
