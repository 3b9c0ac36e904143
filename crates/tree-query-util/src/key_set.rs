//! Ordered key sets.
//!
//! Traversal works on sets of child keys per node: the keys a pattern admits,
//! the keys left over for skip-mode descent, and so on. `KeySet` keeps
//! first-insertion order so results follow the node's own key enumeration.

use indexmap::IndexSet;
use serde_json::Value;

use crate::node::child;

/// An insertion-ordered set of unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet {
    keys: IndexSet<String>,
}

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// All own keys of a node, in enumeration order.
    ///
    /// Array keys are the decimal renderings of the indices.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use tree_query_util::KeySet;
    ///
    /// let keys = KeySet::of_node(&json!({"b": 1, "a": 2}));
    /// assert_eq!(keys.into_vec(), vec!["b", "a"]);
    ///
    /// let keys = KeySet::of_node(&json!(["x", "y"]));
    /// assert_eq!(keys.into_vec(), vec!["0", "1"]);
    /// ```
    pub fn of_node(node: &Value) -> Self {
        match node {
            Value::Object(map) => map.keys().cloned().collect(),
            Value::Array(arr) => (0..arr.len()).map(|i| i.to_string()).collect(),
            _ => Self::new(),
        }
    }

    /// Own keys of a node whose child value satisfies `predicate`.
    pub fn of_node_where<P>(node: &Value, mut predicate: P) -> Self
    where
        P: FnMut(&str, &Value) -> bool,
    {
        match node {
            Value::Object(map) => map
                .iter()
                .filter(|(k, v)| predicate(k, v))
                .map(|(k, _)| k.clone())
                .collect(),
            Value::Array(arr) => arr
                .iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .filter(|(k, v)| predicate(k, v))
                .map(|(k, _)| k)
                .collect(),
            _ => Self::new(),
        }
    }

    /// Insert a key. Returns false if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Keys of `self` followed by the keys of `other` not already present.
    pub fn union(&self, other: &KeySet) -> KeySet {
        let mut keys = self.keys.clone();
        keys.extend(other.keys.iter().cloned());
        KeySet { keys }
    }

    /// Keys of `self` that are also in `other`, in `self`'s order.
    pub fn intersect(&self, other: &KeySet) -> KeySet {
        self.keys
            .iter()
            .filter(|k| other.keys.contains(*k))
            .cloned()
            .collect()
    }

    /// Keys of `self` that are not in `other`, in `self`'s order.
    pub fn subtract(&self, other: &KeySet) -> KeySet {
        self.keys
            .iter()
            .filter(|k| !other.keys.contains(*k))
            .cloned()
            .collect()
    }

    /// Extract the children of `node` under these keys, in set order.
    ///
    /// Keys the node does not have are skipped.
    pub fn values_of<'a>(&self, node: &'a Value) -> Vec<&'a Value> {
        self.keys.iter().filter_map(|k| child(node, k)).collect()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.keys.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for KeySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        KeySet {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoIterator for KeySet {
    type Item = String;
    type IntoIter = indexmap::set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}

/// Count distinct keys in a sequence.
///
/// # Examples
///
/// ```
/// use tree_query_util::count_unique;
///
/// assert_eq!(count_unique(["a", "b", "a"]), 2);
/// ```
pub fn count_unique<I, S>(keys: I) -> usize
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    keys.into_iter().collect::<KeySet>().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set(keys: &[&str]) -> KeySet {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_set_algebra_preserves_left_order() {
        let a = set(&["c", "a", "b"]);
        let b = set(&["b", "d", "c"]);

        assert_eq!(a.union(&b).into_vec(), vec!["c", "a", "b", "d"]);
        assert_eq!(a.intersect(&b).into_vec(), vec!["c", "b"]);
        assert_eq!(a.subtract(&b).into_vec(), vec!["a"]);
    }

    #[test]
    fn test_insert_dedupes() {
        let mut keys = KeySet::new();
        assert!(keys.insert("x"));
        assert!(!keys.insert("x"));
        assert_eq!(keys.len(), 1);
    }

    #[test]
    fn test_of_node_where_filters_by_value() {
        let node = json!({"x": 1, "y": 2, "z": 1});
        let keys = KeySet::of_node_where(&node, |_, v| *v == json!(1));
        assert_eq!(keys.into_vec(), vec!["x", "z"]);
    }

    #[test]
    fn test_values_of_skips_missing_keys() {
        let node = json!({"a": 1, "b": 2});
        let keys = set(&["b", "missing", "a"]);
        assert_eq!(keys.values_of(&node), vec![&json!(2), &json!(1)]);
    }

    #[test]
    fn test_primitive_has_no_keys() {
        assert!(KeySet::of_node(&json!(42)).is_empty());
    }
}
