use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Flat attribute mapping produced by shredding: FQN -> leaf text
pub type Attributes = BTreeMap<String, String>;

/// How `null` leaves are written to the attribute mapping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum NullPolicy {
    /// Write an empty string
    #[default]
    Empty,
    /// Write the literal text `null`
    Literal,
    /// Skip the attribute entirely
    Omit,
}

/// How array elements are visited
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayPolicy {
    /// Dispatch on each element's own kind (objects, nested arrays and scalars)
    #[default]
    Dispatch,
    /// Only objects are accepted as array elements; anything else is an error
    ObjectsOnly,
}

/// Configuration for the shredding process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShredConfig {
    /// Separator placed between path segments
    pub separator: String,

    /// Encoding used for `null` leaves
    pub null_policy: NullPolicy,

    /// Handling of array elements
    pub array_policy: ArrayPolicy,
}

impl Default for ShredConfig {
    fn default() -> Self {
        ShredConfig {
            separator: String::from("_"),
            null_policy: NullPolicy::default(),
            array_policy: ArrayPolicy::default(),
        }
    }
}

/// Human-readable kind of a tree node, used in error messages and logs
pub fn node_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = ShredConfig::default();
        assert_eq!(config.separator, "_");
        assert_eq!(config.null_policy, NullPolicy::Empty);
        assert_eq!(config.array_policy, ArrayPolicy::Dispatch);
    }

    #[test]
    fn test_config_from_json() {
        let config: ShredConfig = serde_json::from_value(json!({
            "separator": ".",
            "null_policy": "omit",
            "array_policy": "objectsonly"
        }))
        .unwrap();

        assert_eq!(config.separator, ".");
        assert_eq!(config.null_policy, NullPolicy::Omit);
        assert_eq!(config.array_policy, ArrayPolicy::ObjectsOnly);
    }

    #[test]
    fn test_node_kind() {
        assert_eq!(node_kind(&json!([1])), "array");
        assert_eq!(node_kind(&json!(null)), "null");
        assert_eq!(node_kind(&json!({"a": 1})), "object");
    }
}
