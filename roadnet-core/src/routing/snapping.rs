use geo::Point;
use log::trace;
use rayon::prelude::*;

use crate::geometry::haversine_distance;
use crate::{Meters, NodeId, RoadNetwork};

/// Node found for a query point
#[derive(Debug, Clone, PartialEq)]
pub struct Snap {
    pub node: NodeId,
    /// Great-circle distance from the query point in meters
    pub distance: Meters,
}

/// Nearest indexed node to `point` by great-circle distance.
///
/// Scans every node with coordinates. On equal distances the node that
/// comes first in index order wins. Returns `None` for a network without
/// located nodes or when no distance can be computed (e.g. a NaN query
/// coordinate).
pub fn nearest_node(network: &RoadNetwork, point: Point<f64>) -> Option<Snap> {
    let mut best: Option<(&str, Meters)> = None;

    for (id, location) in network.indexed_nodes() {
        let distance = haversine_distance(point, location);
        if distance.is_nan() {
            continue;
        }
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((id, distance));
        }
    }

    best.map(|(id, distance)| Snap {
        node: id.to_string(),
        distance,
    })
}

/// Snap many points to their nearest nodes in parallel.
///
/// The result is aligned with `points`; a point gets `None` when the
/// network has no located nodes or its nearest node lies farther than
/// `max_distance`.
pub fn snap_points(
    network: &RoadNetwork,
    points: &[Point<f64>],
    max_distance: Option<Meters>,
) -> Vec<Option<Snap>> {
    points
        .par_iter()
        .map(|&point| {
            let snap = nearest_node(network, point)?;
            match max_distance {
                Some(max) if snap.distance > max => {
                    trace!(
                        "Point {point:?} is {:.1} m from node {} (max: {max} m) - not snapped",
                        snap.distance, snap.node
                    );
                    None
                }
                _ => Some(snap),
            }
        })
        .collect()
}
