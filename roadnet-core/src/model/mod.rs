//! Data model for the road network
//!
//! Contains the input records accepted by the builder and the built,
//! immutable network they produce.

pub mod attributes;
pub mod network;
pub mod records;

pub use attributes::{edge_cost, is_oneway};
pub use network::{Adjacency, EdgeKey, NetworkSummary, RoadNetwork, RoadNode, RoadSegment};
pub use records::{EdgeGeometry, EdgeRecord, NodeRecord};
