//! Road network graph construction and shortest-path routing.
//!
//! A [`RoadNetwork`] is built once from node and edge records and then
//! queried for nearest nodes and shortest paths. Rebuilding replaces the
//! whole network; there is no incremental update.

pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::build_network;
pub use model::{EdgeGeometry, EdgeKey, EdgeRecord, NodeRecord, RoadNetwork};
pub use routing::{
    Route, RoutingConfig, Snap, nearest_node, route_between_points, shortest_path, snap_points,
};

/// Mean Earth radius in meters used for all great-circle distances
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Attribute every edge carries once the network is built
pub const LENGTH_ATTRIBUTE: &str = "length";

pub type NodeId = String;
pub type Meters = f64;
