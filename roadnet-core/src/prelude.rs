// Re-export key components
pub use crate::loading::build_network;
pub use crate::model::{
    Adjacency, EdgeGeometry, EdgeKey, EdgeRecord, NetworkSummary, NodeRecord, RoadNetwork,
    RoadNode, RoadSegment, edge_cost, is_oneway,
};
pub use crate::routing::{
    Route, RoutingConfig, Snap, nearest_node, route_between_points, shortest_path, snap_points,
};

// Core types and constants
pub use crate::Error;
pub use crate::Meters; // meters
pub use crate::NodeId;
pub use crate::{EARTH_RADIUS_M, LENGTH_ATTRIBUTE};
