//! Single-position matching rules.
//!
//! A pattern is one element of a [`Query`](crate::Query). It decides which
//! child keys of a node are admissible at its position, optionally
//! constraining the child value, and may mark the matched node as a return
//! or aggregation boundary.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::{Map, Value};
use tree_query_util::{child, is_primitive, strings::as_text, text_equals, KeySet};

use crate::syntax::*;
use crate::util::{decode_key, encode_key};
use crate::PatternError;

/// Boundary marker wrapped around a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `[...]`: return boundary.
    Bracket,
    /// `{...}`: aggregation boundary. Matches found beneath a node matched by
    /// a brace-marked pattern are reported once, at that node.
    Brace,
}

impl Marker {
    pub fn open(self) -> char {
        match self {
            Marker::Bracket => MARKER_BRACKET_OPEN,
            Marker::Brace => MARKER_BRACE_OPEN,
        }
    }

    pub fn close(self) -> char {
        match self {
            Marker::Bracket => MARKER_BRACKET_CLOSE,
            Marker::Brace => MARKER_BRACE_CLOSE,
        }
    }

    fn from_symbol(symbol: &str) -> Option<Marker> {
        match symbol {
            "[" => Some(Marker::Bracket),
            "{" => Some(Marker::Brace),
            _ => None,
        }
    }
}

/// Key-matching part of a descriptor pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMatcher {
    /// `|`: any key.
    Wildcard,
    /// `"`: any key whose value is a primitive.
    Primitive,
    /// `a<b<c`: any of the enumerated keys.
    Options(Vec<String>),
    /// A single literal key.
    Key(String),
}

/// A pattern that carries more than a bare key.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDescriptor {
    pub key: KeyMatcher,
    /// Required value of the matched child.
    pub value: Option<Value>,
    pub marker: Option<Marker>,
}

impl PatternDescriptor {
    pub fn new(key: KeyMatcher) -> Self {
        Self {
            key,
            value: None,
            marker: None,
        }
    }
}

/// A single-key matching rule.
///
/// # Example
///
/// ```
/// use tree_query_path::{KeyValuePattern, Marker};
/// use serde_json::json;
///
/// let pattern: KeyValuePattern = "{a<b^1}".parse().unwrap();
/// assert!(pattern.matches_key("b"));
/// assert!(!pattern.matches_key("c"));
/// assert!(pattern.matches_value(&json!(1)));
/// assert_eq!(pattern.marker(), Some(Marker::Brace));
/// assert_eq!(pattern.to_string(), "{a<b^1}");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum KeyValuePattern {
    /// A bare literal key with no value constraint and no marker.
    Literal(String),
    /// `\`: switches traversal into skip mode. Never matches a key itself.
    Skip,
    Descriptor(PatternDescriptor),
}

fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?:\[([^\[\]]*)\]|\{([^{}]*)\})$").unwrap())
}

fn split_marker(input: &str) -> (&str, Option<Marker>) {
    match marker_regex().captures(input) {
        Some(caps) => {
            if let Some(inner) = caps.get(1) {
                (inner.as_str(), Some(Marker::Bracket))
            } else if let Some(inner) = caps.get(2) {
                (inner.as_str(), Some(Marker::Brace))
            } else {
                (input, None)
            }
        }
        None => (input, None),
    }
}

/// Compare a required value against a node value.
///
/// Values written in the textual notation are strings; they also match a
/// non-string primitive whose JSON rendering is the same text.
fn value_matches(expected: &Value, actual: &Value) -> bool {
    if expected == actual {
        return true;
    }
    match expected {
        Value::String(text) => text_equals(actual, text),
        _ => false,
    }
}

impl KeyValuePattern {
    /// Parse the compact textual notation of one pattern.
    ///
    /// Dispatch happens on the still-encoded key part, so `%7C` is the
    /// literal key `|` while `|` is the wildcard.
    ///
    /// # Errors
    ///
    /// - `PatternError::SkipWithConstraint` for `\` combined with a value or marker
    /// - `PatternError::Path` if a key, option or value fails to percent-decode
    pub fn parse(input: &str) -> Result<Self, PatternError> {
        let (body, marker) = split_marker(input);
        let (key_part, value_part) = match body.split_once(VALUE_SEPARATOR) {
            Some((key, value)) => (key, Some(value)),
            None => (body, None),
        };

        if key_part == SYMBOL_SKIP {
            if value_part.is_some() || marker.is_some() {
                return Err(PatternError::SkipWithConstraint);
            }
            return Ok(KeyValuePattern::Skip);
        }

        let key = if key_part == SYMBOL_WILDCARD {
            KeyMatcher::Wildcard
        } else if key_part == SYMBOL_PRIMITIVE {
            KeyMatcher::Primitive
        } else if key_part.contains(OPTION_SEPARATOR) {
            let options = key_part
                .split(OPTION_SEPARATOR)
                .map(decode_key)
                .collect::<Result<Vec<_>, _>>()?;
            KeyMatcher::Options(options)
        } else {
            let key = decode_key(key_part)?;
            if value_part.is_none() && marker.is_none() {
                return Ok(KeyValuePattern::Literal(key));
            }
            KeyMatcher::Key(key)
        };

        let value = value_part
            .map(|v| decode_key(v).map(Value::String))
            .transpose()?;

        Ok(KeyValuePattern::Descriptor(PatternDescriptor { key, value, marker }))
    }

    /// Build a pattern from its JSON descriptor form.
    ///
    /// - string: literal key
    /// - number: literal key in decimal form
    /// - array: enumerated key options
    /// - object: exactly one of `symbol`, `options`, `key`, plus optional
    ///   `value` and `marker` (`"["` or `"{"`)
    ///
    /// # Example
    ///
    /// ```
    /// use tree_query_path::KeyValuePattern;
    /// use serde_json::json;
    ///
    /// let pattern = KeyValuePattern::from_json(&json!({"symbol": "|", "value": 1})).unwrap();
    /// assert_eq!(pattern.to_string(), "|^1");
    /// assert!(KeyValuePattern::from_json(&json!({"symbol": "|", "key": "a"})).is_err());
    /// ```
    pub fn from_json(descriptor: &Value) -> Result<Self, PatternError> {
        match descriptor {
            Value::String(key) => Ok(KeyValuePattern::Literal(key.clone())),
            Value::Number(n) => Ok(KeyValuePattern::Literal(n.to_string())),
            Value::Array(items) => Ok(Self::options(option_keys(items)?)),
            Value::Object(map) => Self::from_descriptor_map(map),
            other => Err(PatternError::InvalidDescriptor(other.to_string())),
        }
    }

    fn from_descriptor_map(map: &Map<String, Value>) -> Result<Self, PatternError> {
        let present = ["symbol", "options", "key"]
            .iter()
            .filter(|field| map.contains_key(**field))
            .count();
        if present != 1 {
            return Err(PatternError::InvalidDescriptor(
                "expected exactly one of symbol, options, key".to_string(),
            ));
        }

        let value = map.get("value").cloned();
        let marker = match map.get("marker") {
            None => None,
            Some(Value::String(symbol)) => Some(
                Marker::from_symbol(symbol)
                    .ok_or_else(|| PatternError::InvalidDescriptor(format!("marker {symbol}")))?,
            ),
            Some(other) => return Err(PatternError::InvalidDescriptor(format!("marker {other}"))),
        };

        let key = if let Some(symbol) = map.get("symbol") {
            match symbol.as_str() {
                Some(SYMBOL_SKIP) => {
                    if value.is_some() || marker.is_some() {
                        return Err(PatternError::SkipWithConstraint);
                    }
                    return Ok(KeyValuePattern::Skip);
                }
                Some(SYMBOL_WILDCARD) => KeyMatcher::Wildcard,
                Some(SYMBOL_PRIMITIVE) => KeyMatcher::Primitive,
                _ => return Err(PatternError::InvalidDescriptor(format!("symbol {symbol}"))),
            }
        } else if let Some(options) = map.get("options") {
            match options {
                Value::Array(items) => KeyMatcher::Options(option_keys(items)?),
                other => return Err(PatternError::InvalidDescriptor(format!("options {other}"))),
            }
        } else {
            match map.get("key") {
                Some(Value::String(key)) => KeyMatcher::Key(key.clone()),
                Some(Value::Number(n)) => KeyMatcher::Key(n.to_string()),
                other => {
                    return Err(PatternError::InvalidDescriptor(format!(
                        "key {}",
                        other.unwrap_or(&Value::Null)
                    )))
                }
            }
        };

        Ok(KeyValuePattern::Descriptor(PatternDescriptor { key, value, marker }))
    }

    pub fn literal(key: impl Into<String>) -> Self {
        KeyValuePattern::Literal(key.into())
    }

    pub fn skip() -> Self {
        KeyValuePattern::Skip
    }

    pub fn wildcard() -> Self {
        KeyValuePattern::Descriptor(PatternDescriptor::new(KeyMatcher::Wildcard))
    }

    pub fn primitive() -> Self {
        KeyValuePattern::Descriptor(PatternDescriptor::new(KeyMatcher::Primitive))
    }

    pub fn options<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = keys.into_iter().map(Into::into).collect();
        KeyValuePattern::Descriptor(PatternDescriptor::new(KeyMatcher::Options(options)))
    }

    /// A single-key descriptor. Unlike [`KeyValuePattern::literal`] it can
    /// carry a value and a marker.
    pub fn key(key: impl Into<String>) -> Self {
        KeyValuePattern::Descriptor(PatternDescriptor::new(KeyMatcher::Key(key.into())))
    }

    /// Builder form of [`KeyValuePattern::set_value`].
    pub fn with_value(mut self, value: impl Into<Value>) -> Result<Self, PatternError> {
        self.set_value(value)?;
        Ok(self)
    }

    /// Builder form of [`KeyValuePattern::set_marker`].
    pub fn with_marker(mut self, marker: Marker) -> Result<Self, PatternError> {
        self.set_marker(marker)?;
        Ok(self)
    }

    /// Require a value on the matched child. A literal is expanded into a
    /// single-key descriptor first.
    pub fn set_value(&mut self, value: impl Into<Value>) -> Result<&mut Self, PatternError> {
        self.descriptor_mut()?.value = Some(value.into());
        Ok(self)
    }

    /// Mark the pattern as a boundary. A literal is expanded into a
    /// single-key descriptor first.
    pub fn set_marker(&mut self, marker: Marker) -> Result<&mut Self, PatternError> {
        self.descriptor_mut()?.marker = Some(marker);
        Ok(self)
    }

    fn descriptor_mut(&mut self) -> Result<&mut PatternDescriptor, PatternError> {
        if let KeyValuePattern::Literal(key) = self {
            let key = std::mem::take(key);
            *self = KeyValuePattern::key(key);
        }
        match self {
            KeyValuePattern::Descriptor(descriptor) => Ok(descriptor),
            _ => Err(PatternError::SkipWithConstraint),
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            KeyValuePattern::Descriptor(d) => d.value.as_ref(),
            _ => None,
        }
    }

    pub fn marker(&self) -> Option<Marker> {
        match self {
            KeyValuePattern::Descriptor(d) => d.marker,
            _ => None,
        }
    }

    pub fn is_marked(&self) -> bool {
        self.marker().is_some()
    }

    /// Whether the pattern is an aggregation boundary (`{...}`).
    pub fn is_aggregating(&self) -> bool {
        self.marker() == Some(Marker::Brace)
    }

    pub fn is_skipper(&self) -> bool {
        matches!(self, KeyValuePattern::Skip)
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            KeyValuePattern::Literal(key) => Some(key),
            _ => None,
        }
    }

    /// Check a key against the key part of the pattern.
    ///
    /// Value constraints are not consulted; see
    /// [`KeyValuePattern::matches_value`].
    pub fn matches_key(&self, key: &str) -> bool {
        match self {
            KeyValuePattern::Literal(literal) => literal == key,
            KeyValuePattern::Skip => false,
            KeyValuePattern::Descriptor(d) => match &d.key {
                KeyMatcher::Wildcard | KeyMatcher::Primitive => true,
                KeyMatcher::Options(options) => options.iter().any(|o| o == key),
                KeyMatcher::Key(k) => k == key,
            },
        }
    }

    /// Check a node value against the value part of the pattern.
    ///
    /// Patterns without a value constraint accept every value, except the
    /// primitive symbol which rejects containers.
    pub fn matches_value(&self, value: &Value) -> bool {
        match self {
            KeyValuePattern::Literal(_) | KeyValuePattern::Skip => true,
            KeyValuePattern::Descriptor(d) => {
                if d.key == KeyMatcher::Primitive && !is_primitive(value) {
                    return false;
                }
                match &d.value {
                    Some(expected) => value_matches(expected, value),
                    None => true,
                }
            }
        }
    }

    /// Keys of `node` admitted by this pattern, in the pattern's option order
    /// or the node's enumeration order.
    ///
    /// A candidate key is admitted only when the node has it and its child
    /// passes [`KeyValuePattern::matches_value`]. A wildcard with a value
    /// therefore works as a reverse lookup from value to keys.
    ///
    /// # Example
    ///
    /// ```
    /// use tree_query_path::KeyValuePattern;
    /// use serde_json::json;
    ///
    /// let node = json!({"x": 1, "y": 2, "z": 1});
    /// let pattern: KeyValuePattern = "|^1".parse().unwrap();
    /// assert_eq!(pattern.select_keys(&node).into_vec(), vec!["x", "z"]);
    /// ```
    pub fn select_keys(&self, node: &Value) -> KeySet {
        let admit = |key: &str| child(node, key).is_some_and(|v| self.matches_value(v));
        match self {
            KeyValuePattern::Skip => KeySet::new(),
            KeyValuePattern::Literal(key) => single_key(key, admit(key)),
            KeyValuePattern::Descriptor(d) => match &d.key {
                KeyMatcher::Key(key) => single_key(key, admit(key)),
                KeyMatcher::Options(options) => options
                    .iter()
                    .filter(|key| admit(key.as_str()))
                    .map(String::as_str)
                    .collect(),
                KeyMatcher::Wildcard | KeyMatcher::Primitive => {
                    KeySet::of_node_where(node, |_, v| self.matches_value(v))
                }
            },
        }
    }
}

fn single_key(key: &str, admitted: bool) -> KeySet {
    let mut keys = KeySet::new();
    if admitted {
        keys.insert(key);
    }
    keys
}

fn option_keys(items: &[Value]) -> Result<Vec<String>, PatternError> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(PatternError::InvalidDescriptor(format!("option {other}"))),
        })
        .collect()
}

impl fmt::Display for KeyValuePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match self {
            KeyValuePattern::Literal(key) => return f.write_str(&encode_key(key)),
            KeyValuePattern::Skip => return f.write_str(SYMBOL_SKIP),
            KeyValuePattern::Descriptor(d) => d,
        };

        let mut body = match &d.key {
            KeyMatcher::Wildcard => SYMBOL_WILDCARD.to_string(),
            KeyMatcher::Primitive => SYMBOL_PRIMITIVE.to_string(),
            KeyMatcher::Options(options) => options
                .iter()
                .map(|o| encode_key(o))
                .collect::<Vec<_>>()
                .join(OPTION_SEPARATOR.to_string().as_str()),
            KeyMatcher::Key(key) => encode_key(key),
        };
        if let Some(value) = &d.value {
            body.push(VALUE_SEPARATOR);
            body.push_str(&encode_key(&as_text(value)));
        }

        match d.marker {
            Some(marker) => write!(f, "{}{}{}", marker.open(), body, marker.close()),
            None => f.write_str(&body),
        }
    }
}

impl FromStr for KeyValuePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyValuePattern::parse(s)
    }
}

impl From<&str> for KeyValuePattern {
    /// A literal key, taken verbatim (no notation parsing).
    fn from(key: &str) -> Self {
        KeyValuePattern::Literal(key.to_string())
    }
}

impl From<String> for KeyValuePattern {
    fn from(key: String) -> Self {
        KeyValuePattern::Literal(key)
    }
}

impl Serialize for KeyValuePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for KeyValuePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        KeyValuePattern::parse(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(s: &str) -> KeyValuePattern {
        KeyValuePattern::parse(s).unwrap_or_else(|e| panic!("parse failed for '{s}': {e}"))
    }

    #[test]
    fn test_plain_key_is_literal() {
        assert_eq!(parse("foo"), KeyValuePattern::Literal("foo".into()));
        assert_eq!(parse("a%5Eb"), KeyValuePattern::Literal("a^b".into()));
    }

    #[test]
    fn test_symbols() {
        assert_eq!(parse("|"), KeyValuePattern::wildcard());
        assert_eq!(parse("\""), KeyValuePattern::primitive());
        assert_eq!(parse("\\"), KeyValuePattern::Skip);
        assert!(parse("\\").is_skipper());
    }

    #[test]
    fn test_encoded_symbol_is_literal() {
        assert_eq!(parse("%7C"), KeyValuePattern::Literal("|".into()));
        assert_eq!(parse("%5C"), KeyValuePattern::Literal("\\".into()));
    }

    #[test]
    fn test_options_are_decoded() {
        assert_eq!(
            parse("a<b%3Cc<d"),
            KeyValuePattern::options(["a", "b<c", "d"])
        );
    }

    #[test]
    fn test_key_with_value() {
        let pattern = parse("name^Ann%20Lee");
        assert_eq!(
            pattern,
            KeyValuePattern::Descriptor(PatternDescriptor {
                key: KeyMatcher::Key("name".into()),
                value: Some(json!("Ann Lee")),
                marker: None,
            })
        );
    }

    #[test]
    fn test_value_splits_on_first_caret_only() {
        assert_eq!(parse("k^a^b").value(), Some(&json!("a^b")));
    }

    #[test]
    fn test_markers() {
        assert_eq!(parse("[a]").marker(), Some(Marker::Bracket));
        assert_eq!(parse("{a}").marker(), Some(Marker::Brace));
        assert!(parse("{a}").is_aggregating());
        assert!(!parse("[a]").is_aggregating());
        assert_eq!(parse("{|^1}").value(), Some(&json!("1")));
    }

    #[test]
    fn test_unbalanced_marker_is_plain_text() {
        // Not a marked expression, dispatched as text.
        assert_eq!(parse("[a"), KeyValuePattern::Literal("[a".into()));
        assert_eq!(parse("{a}}"), KeyValuePattern::Literal("{a}}".into()));
    }

    #[test]
    fn test_skip_rejects_constraints() {
        assert_eq!(
            KeyValuePattern::parse("\\^1"),
            Err(PatternError::SkipWithConstraint)
        );
        assert_eq!(
            KeyValuePattern::parse("{\\}"),
            Err(PatternError::SkipWithConstraint)
        );
        assert!(KeyValuePattern::Skip.set_value(1).is_err());
    }

    #[test]
    fn test_set_value_expands_literal() {
        let mut pattern = KeyValuePattern::literal("a");
        pattern.set_value("x").unwrap().set_marker(Marker::Brace).unwrap();
        assert_eq!(pattern.to_string(), "{a^x}");
    }

    #[test]
    fn test_matches_key() {
        assert!(parse("a").matches_key("a"));
        assert!(!parse("a").matches_key("b"));
        assert!(parse("|").matches_key("anything"));
        assert!(parse("\"").matches_key("anything"));
        assert!(parse("a<b").matches_key("b"));
        assert!(!parse("a<b").matches_key("c"));
        assert!(parse("a^1").matches_key("a"));
        assert!(!KeyValuePattern::Skip.matches_key("a"));
    }

    #[test]
    fn test_matches_value() {
        assert!(parse("\"").matches_value(&json!(1)));
        assert!(parse("\"").matches_value(&json!(null)));
        assert!(!parse("\"").matches_value(&json!({})));
        assert!(!parse("\"").matches_value(&json!([])));
        assert!(parse("a^1").matches_value(&json!(1)));
        assert!(parse("a^1").matches_value(&json!("1")));
        assert!(!parse("a^1").matches_value(&json!(2)));
        assert!(parse("a").matches_value(&json!({"any": "thing"})));
        assert!(parse("|").matches_value(&json!([1])));
    }

    #[test]
    fn test_json_value_constraint_is_exact() {
        let pattern = KeyValuePattern::wildcard().with_value(json!({"a": 1})).unwrap();
        assert!(pattern.matches_value(&json!({"a": 1})));
        assert!(!pattern.matches_value(&json!({"a": 2})));
    }

    #[test]
    fn test_select_keys_options_with_value_is_per_key() {
        let node = json!({"a": 1, "b": 2, "c": 1});
        let pattern = parse("a<b<c^1");
        assert_eq!(pattern.select_keys(&node).into_vec(), vec!["a", "c"]);
    }

    #[test]
    fn test_select_keys_options_follow_option_order() {
        let node = json!({"a": 1, "b": 2, "c": 3});
        assert_eq!(parse("c<x<a").select_keys(&node).into_vec(), vec!["c", "a"]);
    }

    #[test]
    fn test_select_keys_primitive() {
        let node = json!({"a": 1, "b": {"c": 2}, "d": "x", "e": [1]});
        assert_eq!(parse("\"").select_keys(&node).into_vec(), vec!["a", "d"]);
    }

    #[test]
    fn test_select_keys_array_node() {
        let node = json!(["x", {"y": 1}, "x"]);
        assert_eq!(parse("|^x").select_keys(&node).into_vec(), vec!["0", "2"]);
        assert_eq!(parse("1").select_keys(&node).into_vec(), vec!["1"]);
        assert!(parse("3").select_keys(&node).is_empty());
    }

    #[test]
    fn test_select_keys_on_primitive_node() {
        assert!(parse("|").select_keys(&json!("leaf")).is_empty());
    }

    #[test]
    fn test_from_json_descriptors() {
        assert_eq!(
            KeyValuePattern::from_json(&json!("a")).unwrap(),
            KeyValuePattern::literal("a")
        );
        assert_eq!(
            KeyValuePattern::from_json(&json!(3)).unwrap(),
            KeyValuePattern::literal("3")
        );
        assert_eq!(
            KeyValuePattern::from_json(&json!(["a", "b"])).unwrap(),
            KeyValuePattern::options(["a", "b"])
        );
        assert_eq!(
            KeyValuePattern::from_json(&json!({"symbol": "\\"})).unwrap(),
            KeyValuePattern::Skip
        );
        let keyed =
            KeyValuePattern::from_json(&json!({"key": "a", "value": 1, "marker": "{"})).unwrap();
        assert_eq!(keyed.to_string(), "{a^1}");
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(KeyValuePattern::from_json(&json!({})).is_err());
        assert!(KeyValuePattern::from_json(&json!({"symbol": "?"})).is_err());
        assert!(KeyValuePattern::from_json(&json!({"key": "a", "marker": "("})).is_err());
        assert!(KeyValuePattern::from_json(&json!({"options": "a"})).is_err());
        assert!(KeyValuePattern::from_json(&json!(true)).is_err());
        assert_eq!(
            KeyValuePattern::from_json(&json!({"symbol": "\\", "value": 1})),
            Err(PatternError::SkipWithConstraint)
        );
    }

    #[test]
    fn test_to_string_encodes() {
        assert_eq!(KeyValuePattern::literal("a>b").to_string(), "a%3Eb");
        assert_eq!(KeyValuePattern::options(["|", "x"]).to_string(), "%7C<x");
        assert_eq!(
            KeyValuePattern::key("k").with_value("v w").unwrap().to_string(),
            "k^v%20w"
        );
    }
}
