//! Edge attribute helpers shared by the builder and the router

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::LENGTH_ATTRIBUTE;

/// Traversal cost of an edge for the requested attribute.
///
/// Uses the attribute when it holds a finite number and falls back to the
/// edge's `length` otherwise. The fallback is decided per edge, so a network
/// may mix edges that do and do not carry `weight`.
pub fn edge_cost(attributes: &BTreeMap<String, f64>, weight: &str) -> f64 {
    match attributes.get(weight) {
        Some(&value) if value.is_finite() => value,
        _ => attributes
            .get(LENGTH_ATTRIBUTE)
            .copied()
            .unwrap_or(f64::INFINITY),
    }
}

/// One-way flag as found in road datasets: boolean `true`, numeric `1`
/// or the literal string `"True"`. Anything else is a two-way road.
pub fn is_oneway(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(flag) => *flag,
        JsonValue::Number(n) => n.as_f64() == Some(1.0),
        JsonValue::String(s) => s == "True",
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn test_cost_uses_requested_attribute() {
        let a = attrs(&[("length", 400.0), ("bc", 0.12)]);
        assert_eq!(edge_cost(&a, "bc"), 0.12);
        assert_eq!(edge_cost(&a, "length"), 400.0);
    }

    #[test]
    fn test_cost_falls_back_to_length() {
        let a = attrs(&[("length", 400.0), ("bc", f64::NAN)]);
        assert_eq!(edge_cost(&a, "bc"), 400.0);
        assert_eq!(edge_cost(&a, "travel_time"), 400.0);
    }

    #[test]
    fn test_cost_without_length_is_infinite() {
        assert!(edge_cost(&BTreeMap::new(), "length").is_infinite());
    }

    #[test]
    fn test_oneway_spellings() {
        assert!(is_oneway(&json!(true)));
        assert!(is_oneway(&json!(1)));
        assert!(is_oneway(&json!(1.0)));
        assert!(is_oneway(&json!("True")));

        assert!(!is_oneway(&json!(false)));
        assert!(!is_oneway(&json!(0)));
        assert!(!is_oneway(&json!("true")));
        assert!(!is_oneway(&json!("yes")));
        assert!(!is_oneway(&JsonValue::Null));
    }
}
