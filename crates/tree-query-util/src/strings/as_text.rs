use serde_json::Value;
use std::borrow::Cow;

/// Render a node value as text.
///
/// Strings render as their raw content, every other value as compact JSON.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tree_query_util::strings::as_text;
///
/// assert_eq!(as_text(&json!("hello")), "hello");
/// assert_eq!(as_text(&json!(1)), "1");
/// assert_eq!(as_text(&json!(true)), "true");
/// assert_eq!(as_text(&json!({"a": [1]})), r#"{"a":[1]}"#);
/// ```
pub fn as_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Check whether a primitive node renders to exactly `text`.
///
/// Containers never compare equal to text.
pub fn text_equals(value: &Value, text: &str) -> bool {
    match value {
        Value::Object(_) | Value::Array(_) => false,
        other => as_text(other) == text,
    }
}
