//! Queries over a built [`RoadNetwork`](crate::RoadNetwork): nearest-node
//! snapping and single-pair shortest paths.

mod config;
pub mod dijkstra;
mod route;
mod snapping;
mod to_geojson;

pub use config::RoutingConfig;
pub use dijkstra::shortest_path;
pub use route::{Route, route_between_points};
pub use snapping::{Snap, nearest_node, snap_points};
