use serde_json::Value;

/// Check whether a node can hold children (object or array).
pub fn is_container(node: &Value) -> bool {
    matches!(node, Value::Object(_) | Value::Array(_))
}

/// Check whether a node is a primitive leaf.
///
/// `null` counts as a primitive: it is what an unset node holds.
pub fn is_primitive(node: &Value) -> bool {
    !is_container(node)
}

/// Parse a key as an array index.
///
/// Only canonical decimal renderings are accepted, so `"01"` and `"-1"` are
/// not indices.
///
/// # Examples
///
/// ```
/// use tree_query_util::array_index;
///
/// assert_eq!(array_index("0"), Some(0));
/// assert_eq!(array_index("12"), Some(12));
/// assert_eq!(array_index("01"), None);
/// assert_eq!(array_index("x"), None);
/// ```
pub fn array_index(key: &str) -> Option<usize> {
    let bytes = key.as_bytes();
    if bytes.is_empty() || (bytes.len() > 1 && bytes[0] == b'0') {
        return None;
    }
    if !bytes.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse().ok()
}

/// Get the child of a node under `key`.
pub fn child<'a>(node: &'a Value, key: &str) -> Option<&'a Value> {
    match node {
        Value::Object(map) => map.get(key),
        Value::Array(arr) => arr.get(array_index(key)?),
        _ => None,
    }
}

/// Get a mutable reference to the child of a node under `key`.
pub fn child_mut<'a>(node: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match node {
        Value::Object(map) => map.get_mut(key),
        Value::Array(arr) => arr.get_mut(array_index(key)?),
        _ => None,
    }
}
