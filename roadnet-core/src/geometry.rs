//! Great-circle helpers over `geo` types.
//!
//! Coordinates follow the `geo` convention: `x` is longitude and `y` is
//! latitude, both in degrees.

use geo::{LineString, Point};
use itertools::Itertools;

use crate::{EARTH_RADIUS_M, Meters};

/// Haversine distance between two points in meters.
pub fn haversine_distance(a: Point<f64>, b: Point<f64>) -> Meters {
    let d_lat = (b.y() - a.y()).to_radians();
    let d_lon = (b.x() - a.x()).to_radians();
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();

    let s = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * s.sqrt().asin()
}

/// Sum of haversine distances between consecutive points of a polyline.
/// Empty and single-point lines have zero length.
pub fn polyline_length(line: &LineString<f64>) -> Meters {
    line.points()
        .tuple_windows()
        .map(|(a, b)| haversine_distance(a, b))
        .sum()
}

/// Point-reversed copy of a polyline
pub fn reversed(line: &LineString<f64>) -> LineString<f64> {
    line.0.iter().rev().copied().collect()
}
