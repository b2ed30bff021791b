//! Input schema accepted by the network builder

use std::collections::BTreeMap;

use geo::{Coord, LineString, MultiLineString, Point};
use serde::Deserialize;

use crate::loading::de::{deserialize_id, deserialize_oneway};

/// Node with explicit coordinates
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeRecord {
    /// Node identifier, integer ids are normalized to strings
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub lon: f64,
    pub lat: f64,
    /// Named numeric node attributes such as station betweenness `bc`
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            lon,
            lat,
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

/// Edge geometry as supplied: a single path or a multi-part path of
/// `[lon, lat]` positions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EdgeGeometry {
    Path(Vec<[f64; 2]>),
    MultiPath(Vec<Vec<[f64; 2]>>),
}

impl Default for EdgeGeometry {
    fn default() -> Self {
        EdgeGeometry::Path(Vec::new())
    }
}

impl EdgeGeometry {
    /// Polyline of the geometry, multi-part paths flattened in order
    pub fn to_line_string(&self) -> LineString<f64> {
        let to_coord = |&[x, y]: &[f64; 2]| Coord { x, y };
        match self {
            EdgeGeometry::Path(points) => points.iter().map(to_coord).collect(),
            EdgeGeometry::MultiPath(parts) => parts.iter().flatten().map(to_coord).collect(),
        }
    }
}

impl From<&LineString<f64>> for EdgeGeometry {
    fn from(line: &LineString<f64>) -> Self {
        EdgeGeometry::Path(line.coords().map(|c| [c.x, c.y]).collect())
    }
}

impl From<&MultiLineString<f64>> for EdgeGeometry {
    fn from(lines: &MultiLineString<f64>) -> Self {
        EdgeGeometry::MultiPath(
            lines
                .iter()
                .map(|line| line.coords().map(|c| [c.x, c.y]).collect())
                .collect(),
        )
    }
}

/// Edge between two node ids.
///
/// An empty `source` or `target` marks the edge as unusable; the builder
/// drops it.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EdgeRecord {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub source: String,
    #[serde(default, deserialize_with = "deserialize_id")]
    pub target: String,
    #[serde(default)]
    pub geometry: EdgeGeometry,
    /// Named numeric attributes such as `length` (meters) or `bc`
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "deserialize_oneway")]
    pub oneway: bool,
}

impl EdgeRecord {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        geometry: impl Into<EdgeGeometry>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            geometry: geometry.into(),
            attributes: BTreeMap::new(),
            oneway: false,
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: f64) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn oneway(mut self, oneway: bool) -> Self {
        self.oneway = oneway;
        self
    }
}

impl From<Vec<[f64; 2]>> for EdgeGeometry {
    fn from(points: Vec<[f64; 2]>) -> Self {
        EdgeGeometry::Path(points)
    }
}
