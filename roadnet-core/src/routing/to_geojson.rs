use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::Route;
use crate::{Error, RoadNetwork};

impl Route {
    /// Converts the route to a `GeoJSON` `LineString` feature.
    pub fn to_geojson(&self, network: &RoadNetwork) -> Result<Feature, Error> {
        let line: LineString<f64> = self.geometry(network);
        let geometry = Geometry::new(GeoJsonValue::from(&line));

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "nodes": self.nodes,
                "hops": self.hops(),
                "weight": self.weight,
                "distance": self.distance,
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    /// Route feature plus one point feature per visited node
    pub fn to_feature_collection(&self, network: &RoadNetwork) -> Result<FeatureCollection, Error> {
        let mut features = vec![self.to_geojson(network)?];

        for (position, id) in self.nodes.iter().enumerate() {
            let Some(location) = network.node_location(id) else {
                continue;
            };
            let value = json!({
                "type": "Feature",
                "geometry": Geometry::new(GeoJsonValue::from(&location)),
                "properties": {
                    "node": id,
                    "position": position,
                }
            });
            features.push(
                serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))?,
            );
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, network: &RoadNetwork) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_geojson(network)?)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::{EdgeRecord, NodeRecord, build_network, shortest_path};

    #[test]
    fn test_route_feature() {
        let network = build_network(
            vec![NodeRecord::new("a", 0.0, 0.0), NodeRecord::new("b", 0.0, 0.01)],
            vec![EdgeRecord::new("a", "b", vec![[0.0, 0.0], [0.0, 0.01]]).with_attribute("length", 12.0)],
        );
        let route = shortest_path(&network, "a", "b", "length").unwrap();

        let feature = route.to_geojson(&network).unwrap();
        assert_eq!(feature.property("hops"), Some(&serde_json::json!(1)));
        assert_eq!(feature.property("distance"), Some(&serde_json::json!(12.0)));
        assert_eq!(feature.property("nodes"), Some(&serde_json::json!(["a", "b"])));

        let text = route.to_geojson_string(&network).unwrap();
        assert!(text.contains("LineString"));
    }

    #[test]
    fn test_route_feature_collection() {
        let network = build_network(
            vec![NodeRecord::new("a", 0.0, 0.0), NodeRecord::new("b", 0.0, 0.01)],
            vec![EdgeRecord::new("a", "b", vec![[0.0, 0.0], [0.0, 0.01]])],
        );
        let route = shortest_path(&network, "a", "b", "length").unwrap();
        let collection = route.to_feature_collection(&network).unwrap();
        assert_eq!(collection.features.len(), 3);
    }
}
