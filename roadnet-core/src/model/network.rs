//! Built road network: node index, adjacency table and per-edge geometry

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use fixedbitset::FixedBitSet;
use geo::{LineString, Point};
use hashbrown::HashMap;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
};

use super::attributes::edge_cost;
use crate::{LENGTH_ATTRIBUTE, Meters};

/// Directed pair of node ids identifying one traversal direction of an edge.
/// Displayed as `source|target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
}

impl EdgeKey {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.source, self.target)
    }
}

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    pub id: String,
    /// Node coordinates, `None` when neither the node dataset nor any
    /// incident edge geometry provided one
    pub geometry: Option<Point<f64>>,
    /// Numeric attributes from the node dataset, empty for nodes known
    /// only as edge endpoints
    pub attributes: BTreeMap<String, f64>,
}

/// Accepted input edge with its derived `length`
#[derive(Debug, Clone)]
pub struct RoadSegment {
    pub source: String,
    pub target: String,
    /// Forward geometry, source to target
    pub geometry: LineString<f64>,
    pub attributes: BTreeMap<String, f64>,
    pub oneway: bool,
}

impl RoadSegment {
    /// Segment length in meters
    pub fn length(&self) -> Meters {
        self.attributes
            .get(LENGTH_ATTRIBUTE)
            .copied()
            .unwrap_or_default()
    }

    pub fn cost(&self, weight: &str) -> f64 {
        edge_cost(&self.attributes, weight)
    }
}

/// Graph edge weight: one traversal record of the adjacency table
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Position of the originating segment in [`RoadNetwork::segments`]
    pub segment: usize,
    pub key: EdgeKey,
}

/// Borrowed view of an outgoing traversal record
#[derive(Debug, Clone, Copy)]
pub struct Adjacency<'a> {
    pub target: &'a str,
    pub key: &'a EdgeKey,
    pub segment: &'a RoadSegment,
}

impl Adjacency<'_> {
    pub fn cost(&self, weight: &str) -> f64 {
        self.segment.cost(weight)
    }
}

/// Aggregate figures of a built network
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkSummary {
    /// Nodes with known coordinates
    pub node_count: usize,
    pub edge_count: usize,
    pub total_length: Meters,
    /// Outgoing traversal records per adjacency table entry
    pub average_degree: f64,
}

/// Routable road network.
///
/// Graph nodes are every node id seen in the node dataset or as an edge
/// endpoint, in that order. Only edge endpoints belong to the adjacency
/// table; nodes known only from the node dataset can be snapped to but
/// never routed through.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    pub(crate) graph: DiGraph<RoadNode, RoadEdge>,
    pub(crate) node_lookup: HashMap<String, NodeIndex>,
    /// Nodes present in the adjacency table
    pub(crate) routable: FixedBitSet,
    pub(crate) segments: Vec<RoadSegment>,
    pub(crate) geometry_index: HashMap<EdgeKey, LineString<f64>>,
    pub(crate) numeric_attributes: BTreeSet<String>,
    pub(crate) numeric_node_attributes: BTreeSet<String>,
}

impl RoadNetwork {
    /// Network with no nodes and no edges
    pub fn empty() -> Self {
        let mut network = Self::default();
        network
            .numeric_attributes
            .insert(LENGTH_ATTRIBUTE.to_string());
        network
    }

    pub fn graph(&self) -> &DiGraph<RoadNode, RoadEdge> {
        &self.graph
    }

    /// Number of nodes with known coordinates
    pub fn node_count(&self) -> usize {
        self.indexed_nodes().count()
    }

    /// Number of accepted input edges
    pub fn edge_count(&self) -> usize {
        self.segments.len()
    }

    /// Number of directed traversal records in the adjacency table
    pub fn adjacency_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn segments(&self) -> &[RoadSegment] {
        &self.segments
    }

    /// Attribute names holding a finite number on at least one edge,
    /// always including `length`
    pub fn numeric_attributes(&self) -> &BTreeSet<String> {
        &self.numeric_attributes
    }

    /// Node attribute names holding a finite number on at least one node
    pub fn numeric_node_attributes(&self) -> &BTreeSet<String> {
        &self.numeric_node_attributes
    }

    pub fn node(&self, id: &str) -> Option<&RoadNode> {
        self.node_lookup
            .get(id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    pub fn node_location(&self, id: &str) -> Option<Point<f64>> {
        self.node(id).and_then(|node| node.geometry)
    }

    /// Whether the id has an entry in the adjacency table
    pub fn contains_node(&self, id: &str) -> bool {
        self.routable_index(id).is_some()
    }

    pub(crate) fn routable_index(&self, id: &str) -> Option<NodeIndex> {
        self.node_lookup
            .get(id)
            .copied()
            .filter(|idx| self.routable.contains(idx.index()))
    }

    pub(crate) fn node_id(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].id
    }

    /// Nodes with coordinates, in index order
    pub fn indexed_nodes(&self) -> impl Iterator<Item = (&str, Point<f64>)> {
        self.graph
            .node_weights()
            .filter_map(|node| node.geometry.map(|point| (node.id.as_str(), point)))
    }

    /// Outgoing traversal records of a node, empty for unknown ids
    pub fn outgoing<'a>(&'a self, id: &str) -> impl Iterator<Item = Adjacency<'a>> {
        self.routable_index(id)
            .into_iter()
            .flat_map(move |idx| self.graph.edges(idx))
            .map(move |edge| {
                let record = edge.weight();
                Adjacency {
                    target: self.node_id(edge.target()),
                    key: &record.key,
                    segment: &self.segments[record.segment],
                }
            })
    }

    /// Registered geometry for the `source|target` direction
    pub fn edge_geometry(&self, source: &str, target: &str) -> Option<&LineString<f64>> {
        self.geometry_index.get(&EdgeKey::new(source, target))
    }

    pub fn summary(&self) -> NetworkSummary {
        let entries = self.routable.count_ones(..);
        #[allow(clippy::cast_precision_loss)]
        let average_degree = self.adjacency_count() as f64 / entries.max(1) as f64;

        NetworkSummary {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            total_length: self.segments.iter().map(RoadSegment::length).sum(),
            average_degree,
        }
    }

    /// Smallest and largest edge cost for `weight`, with the same `length`
    /// fallback as routing. Non-finite costs are ignored.
    pub fn attribute_range(&self, weight: &str) -> Option<(f64, f64)> {
        self.segments
            .iter()
            .map(|segment| segment.cost(weight))
            .filter(|value| value.is_finite())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
            })
    }

    /// Smallest and largest finite value of a node attribute. Nodes without
    /// the attribute are ignored; there is no fallback.
    pub fn node_attribute_range(&self, name: &str) -> Option<(f64, f64)> {
        self.graph
            .node_weights()
            .filter_map(|node| node.attributes.get(name).copied())
            .filter(|value| value.is_finite())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
            })
    }
}
