use serde::Deserialize;

use crate::{Error, LENGTH_ATTRIBUTE, Meters};

/// Settings for point-to-point routing
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Edge attribute used as traversal cost, `length` when an edge lacks it
    pub weight: String,
    /// Query points farther than this from every node are not snapped
    pub max_snap_distance: Option<Meters>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            weight: LENGTH_ATTRIBUTE.to_string(),
            max_snap_distance: None,
        }
    }
}

impl RoutingConfig {
    #[must_use]
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = weight.into();
        self
    }

    #[must_use]
    pub fn with_max_snap_distance(mut self, distance: Meters) -> Self {
        self.max_snap_distance = Some(distance);
        self
    }

    /// # Errors
    ///
    /// Returns an error for an empty weight attribute or a negative or
    /// non-finite snap distance.
    pub fn validate(&self) -> Result<(), Error> {
        if self.weight.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "weight attribute must not be empty".to_string(),
            ));
        }

        if let Some(distance) = self.max_snap_distance
            && !(distance.is_finite() && distance >= 0.0)
        {
            return Err(Error::InvalidConfig(format!(
                "max_snap_distance must be a non-negative number of meters, got {distance}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config_is_valid() {
        let config = RoutingConfig::default();
        assert_eq!(config.weight, "length");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: RoutingConfig = serde_json::from_value(json!({"weight": "bc"})).unwrap();
        assert_eq!(config.weight, "bc");
        assert_eq!(config.max_snap_distance, None);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            RoutingConfig::default().with_weight(" ").validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(
            RoutingConfig::default()
                .with_max_snap_distance(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            RoutingConfig::default()
                .with_max_snap_distance(f64::NAN)
                .validate()
                .is_err()
        );
    }
}
