use std::collections::BTreeMap;

use geo::Point;
use log::{debug, info};
use petgraph::graph::NodeIndex;

use crate::geometry::{polyline_length, reversed};
use crate::model::{
    EdgeKey, EdgeRecord, NodeRecord, RoadNetwork, RoadNode, RoadSegment, network::RoadEdge,
};
use crate::LENGTH_ATTRIBUTE;

/// Builds a routable network from node and edge records.
///
/// Edges missing either endpoint id are dropped. Edges without a finite
/// `length` get one from the haversine length of their geometry. Two-way
/// edges contribute a traversal record in both directions, one-way edges
/// only from source to target. Endpoints absent from `nodes` take their
/// coordinates from the first incident edge geometry.
///
/// Never fails: no usable edges gives an empty, pathless network.
pub fn build_network<N, E>(nodes: N, edges: E) -> RoadNetwork
where
    N: IntoIterator<Item = NodeRecord>,
    E: IntoIterator<Item = EdgeRecord>,
{
    let mut network = RoadNetwork::empty();

    let mut unnamed = 0usize;
    for node in nodes {
        if node.id.is_empty() {
            unnamed += 1;
            continue;
        }
        network.insert_node(node);
    }
    if unnamed > 0 {
        debug!("Dropped {unnamed} nodes without an id");
    }
    let dataset_nodes = network.graph.node_count();

    let mut dropped = 0usize;
    for edge in edges {
        if edge.source.is_empty() || edge.target.is_empty() {
            dropped += 1;
            continue;
        }
        network.insert_edge(edge);
    }

    if dropped > 0 {
        debug!("Dropped {dropped} edges without both endpoint ids");
    }

    let endpoint_nodes = network.graph.node_count().saturating_sub(dataset_nodes);
    if endpoint_nodes > 0 {
        debug!("Added {endpoint_nodes} nodes missing from the node dataset, located from edge geometries");
    }

    info!(
        "Road network built: {} nodes, {} edges, {} traversal records",
        network.node_count(),
        network.edge_count(),
        network.adjacency_count()
    );

    network
}

impl RoadNetwork {
    fn intern_node(&mut self, id: String) -> NodeIndex {
        if let Some(&idx) = self.node_lookup.get(&id) {
            return idx;
        }
        let idx = self.graph.add_node(RoadNode {
            id: id.clone(),
            geometry: None,
            attributes: BTreeMap::new(),
        });
        self.node_lookup.insert(id, idx);
        idx
    }

    fn insert_node(&mut self, node: NodeRecord) {
        let point = node.point();
        for (name, value) in &node.attributes {
            if value.is_finite() && !self.numeric_node_attributes.contains(name) {
                self.numeric_node_attributes.insert(name.clone());
            }
        }

        let idx = self.intern_node(node.id);
        let road_node = &mut self.graph[idx];
        road_node.geometry = Some(point);
        road_node.attributes = node.attributes;
    }

    fn mark_routable(&mut self, idx: NodeIndex, location: Option<Point<f64>>) {
        self.routable.grow(idx.index() + 1);
        self.routable.insert(idx.index());

        let node = &mut self.graph[idx];
        if node.geometry.is_none() {
            node.geometry = location;
        }
    }

    fn insert_edge(&mut self, edge: EdgeRecord) {
        let EdgeRecord {
            source,
            target,
            geometry,
            mut attributes,
            oneway,
        } = edge;

        let forward = geometry.to_line_string();
        let backward = reversed(&forward);

        let has_length = attributes
            .get(LENGTH_ATTRIBUTE)
            .is_some_and(|length| length.is_finite());
        if !has_length {
            attributes.insert(LENGTH_ATTRIBUTE.to_string(), polyline_length(&forward));
        }

        for (name, value) in &attributes {
            if value.is_finite() && !self.numeric_attributes.contains(name) {
                self.numeric_attributes.insert(name.clone());
            }
        }

        let source_idx = self.intern_node(source.clone());
        let target_idx = self.intern_node(target.clone());
        self.mark_routable(source_idx, forward.points().next());
        self.mark_routable(target_idx, backward.points().next());

        let key = EdgeKey::new(source, target);
        let segment = self.segments.len();

        self.graph.add_edge(
            source_idx,
            target_idx,
            RoadEdge {
                segment,
                key: key.clone(),
            },
        );
        if !oneway {
            self.graph.add_edge(
                target_idx,
                source_idx,
                RoadEdge {
                    segment,
                    key: key.reversed(),
                },
            );
        }

        self.geometry_index.insert(key.reversed(), backward);
        self.geometry_index.insert(key.clone(), forward.clone());

        self.segments.push(RoadSegment {
            source: key.source,
            target: key.target,
            geometry: forward,
            attributes,
            oneway,
        });
    }
}
