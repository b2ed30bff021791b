use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::model::is_oneway;

/// Normalize a JSON node identifier to a string.
/// Strings are kept as they are, numbers use their shortest decimal form.
/// Empty strings, `null` and other value kinds carry no id.
pub fn id_from_json(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => n
            .as_i64()
            .map(|v| v.to_string())
            .or_else(|| n.as_u64().map(|v| v.to_string()))
            .or_else(|| n.as_f64().map(|v| v.to_string())),
        _ => None,
    }
}

pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(id_from_json(&value).unwrap_or_default())
}

pub(crate) fn deserialize_oneway<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(is_oneway(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_from_json() {
        assert_eq!(id_from_json(&json!("100")), Some("100".to_string()));
        assert_eq!(id_from_json(&json!(100)), Some("100".to_string()));
        assert_eq!(id_from_json(&json!(100.0)), Some("100".to_string()));
        assert_eq!(id_from_json(&json!(12.5)), Some("12.5".to_string()));
        assert_eq!(id_from_json(&json!("")), None);
        assert_eq!(id_from_json(&JsonValue::Null), None);
        assert_eq!(id_from_json(&json!(true)), None);
    }
}
