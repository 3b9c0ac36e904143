use serde_json::Value;

/// Count the own keys of a node. Primitives have none.
pub fn key_count(node: &Value) -> usize {
    match node {
        Value::Object(map) => map.len(),
        Value::Array(arr) => arr.len(),
        _ => 0,
    }
}
