use geo::{Coord, LineString, Point};
use itertools::Itertools;
use log::trace;

use super::{RoutingConfig, nearest_node, shortest_path};
use crate::{EdgeKey, Error, Meters, NodeId, RoadNetwork};

/// Shortest path between two nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Node ids from start to goal, both inclusive
    pub nodes: Vec<NodeId>,
    /// Accumulated cost in units of `weight`
    pub distance: f64,
    /// Edge attribute the path was optimized for
    pub weight: String,
}

impl Route {
    /// Number of traversed edges
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    /// Directed edge keys along the path
    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.nodes
            .iter()
            .tuple_windows()
            .map(|(source, target)| EdgeKey::new(source.as_str(), target.as_str()))
            .collect()
    }

    /// Polyline following the registered edge geometries along the path.
    ///
    /// When a segment starts where the previous one ended the shared point
    /// is emitted once. Hops without a registered geometry are skipped.
    pub fn geometry(&self, network: &RoadNetwork) -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> = Vec::new();

        for (source, target) in self.nodes.iter().tuple_windows() {
            let Some(segment) = network.edge_geometry(source, target) else {
                continue;
            };
            let Some(first) = segment.0.first() else {
                continue;
            };

            let skip = usize::from(coords.last() == Some(first));
            coords.extend(segment.0.iter().skip(skip).copied());
        }

        LineString::new(coords)
    }

    /// Length of the route geometry in meters, regardless of `weight`
    pub fn geometry_length(&self, network: &RoadNetwork) -> Meters {
        crate::geometry::polyline_length(&self.geometry(network))
    }
}

/// Snap both points to their nearest nodes and route between them.
///
/// Returns `Ok(None)` when a point cannot be snapped within
/// `config.max_snap_distance` or no path connects the snapped nodes.
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn route_between_points(
    network: &RoadNetwork,
    from: Point<f64>,
    to: Point<f64>,
    config: &RoutingConfig,
) -> Result<Option<Route>, Error> {
    config.validate()?;

    let within_reach = |snap: &super::Snap| {
        config
            .max_snap_distance
            .is_none_or(|max| snap.distance <= max)
    };

    let (Some(start), Some(goal)) = (
        nearest_node(network, from).filter(within_reach),
        nearest_node(network, to).filter(within_reach),
    ) else {
        trace!("Could not snap {from:?} or {to:?} to the road network");
        return Ok(None);
    };

    Ok(shortest_path(network, &start.node, &goal.node, &config.weight))
}
