//! Path-addressed mutation and query collection over one tree.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tree_query_path::{Path, Query};
use tree_query_util::{array_index, child, child_mut, is_container, key_count};

use crate::iterative::IterativeTreeWalker;
use crate::recursive::RecursiveTreeWalker;
use crate::walker::{TreeWalker, Visit, WalkStats};
use crate::TreeError;

/// Callback receiving `(affected_path, affected_node)` after a mutation.
///
/// `affected_node` is `None` when the affected path no longer resolves.
pub type ChangeHandler<'a> = &'a mut dyn FnMut(&Path, Option<&Value>);

/// A nested structure of objects and arrays with primitive leaves.
///
/// Mutations resolve a [`Path`] from the root. The ones taking a
/// [`ChangeHandler`] report what they touched and return whether anything
/// changed.
///
/// Handlers passed to the traversal methods see the tree borrowed
/// immutably, so the tree cannot change under a running walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    items: Value,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

impl From<Value> for Tree {
    fn from(items: Value) -> Self {
        Self::new(items)
    }
}

impl Tree {
    pub fn new(items: Value) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &Value {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Value {
        &mut self.items
    }

    pub fn into_items(self) -> Value {
        self.items
    }

    /// Resolve `path` from the root.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use tree_query::{Path, Tree};
    ///
    /// let tree = Tree::new(json!({"a": [10, {"b": true}]}));
    /// assert_eq!(tree.get_node(&Path::from(["a", "1", "b"])), Some(&json!(true)));
    /// assert_eq!(tree.get_node(&Path::from(["a", "7"])), None);
    /// ```
    pub fn get_node(&self, path: &Path) -> Option<&Value> {
        path.iter()
            .try_fold(&self.items, |node, key| child(node, key))
    }

    pub fn get_node_mut(&mut self, path: &Path) -> Option<&mut Value> {
        let mut node = &mut self.items;
        for key in path.iter() {
            node = child_mut(node, key)?;
        }
        Some(node)
    }

    /// Resolve `path`, creating empty objects for every missing or
    /// primitive node along the way.
    ///
    /// `on_create` is called once, with the topmost created path, if
    /// anything was created.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if a non-index key has to be created under an array,
    /// `NotAContainer` if the root itself is a primitive.
    pub fn get_safe_node(
        &mut self,
        path: &Path,
        on_create: Option<ChangeHandler<'_>>,
    ) -> Result<&mut Value, TreeError> {
        if let Some(created) = self.vivify(path)? {
            self.notify(on_create, &[created]);
        }
        self.get_node_mut(path).ok_or(TreeError::NotFound)
    }

    /// Place `value` at `path`, creating intermediate objects as needed.
    ///
    /// Setting a value equal to the current one changes nothing. Otherwise
    /// the handler gets `path` when an existing key was replaced, or the
    /// parent of the topmost new key when keys were introduced.
    pub fn set_node(
        &mut self,
        path: &Path,
        value: Value,
        on_change: Option<ChangeHandler<'_>>,
    ) -> Result<bool, TreeError> {
        let affected = self.place(path, value)?;
        Ok(self.finish("set", on_change, affected))
    }

    /// Merge `value` into the node at `path`.
    ///
    /// Objects merge shallowly into objects and arrays extend arrays. Any
    /// other combination behaves like [`Tree::set_node`].
    pub fn append_node(
        &mut self,
        path: &Path,
        value: Value,
        on_change: Option<ChangeHandler<'_>>,
    ) -> Result<bool, TreeError> {
        let mergeable = matches!(
            (self.get_node(path), &value),
            (Some(Value::Object(_)), Value::Object(_)) | (Some(Value::Array(_)), Value::Array(_))
        );
        if !mergeable {
            return self.set_node(path, value, on_change);
        }

        let target = self.get_node_mut(path).ok_or(TreeError::NotFound)?;
        let changed = match (target, value) {
            (Value::Object(target), Value::Object(additions)) => {
                let mut changed = false;
                for (key, item) in additions {
                    if target.get(&key) != Some(&item) {
                        target.insert(key, item);
                        changed = true;
                    }
                }
                changed
            }
            (Value::Array(target), Value::Array(items)) => {
                let changed = !items.is_empty();
                target.extend(items);
                changed
            }
            _ => false,
        };
        let affected = changed.then(|| path.clone());
        Ok(self.finish("append", on_change, affected))
    }

    /// Set the node at `path` to `null` in place. The key stays.
    pub fn unset_node(&mut self, path: &Path) -> bool {
        if path.is_empty() {
            return false;
        }
        match self.get_node_mut(path) {
            Some(node) if !node.is_null() => {
                *node = Value::Null;
                tracing::debug!(target: "tree_query::tree", path = %path, op = "unset", "node changed");
                true
            }
            _ => false,
        }
    }

    /// Delete the key at the end of `path` from its parent.
    ///
    /// Under an array, `splice` removes the element and shifts the rest;
    /// without it the element becomes `null` and indices are kept. The
    /// handler gets the parent path on removal, or `path` when an element
    /// was nulled.
    pub fn unset_key(
        &mut self,
        path: &Path,
        splice: bool,
        on_change: Option<ChangeHandler<'_>>,
    ) -> Result<bool, TreeError> {
        let affected = self.remove(path, splice)?;
        Ok(self.finish("unset_key", on_change, affected))
    }

    /// Delete `path` together with every ancestor that would be left empty.
    ///
    /// Climbs while the parent has no other keys, then deletes the topmost
    /// such node with [`Tree::unset_key`]. The root is never removed.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use tree_query::{Path, Tree};
    ///
    /// let mut tree = Tree::new(json!({"a": {"b": {"c": 1}}, "x": 2}));
    /// tree.unset_path(&Path::from(["a", "b", "c"]), false, None).unwrap();
    /// assert_eq!(tree.items(), &json!({"x": 2}));
    /// ```
    pub fn unset_path(
        &mut self,
        path: &Path,
        splice: bool,
        on_change: Option<ChangeHandler<'_>>,
    ) -> Result<bool, TreeError> {
        if path.is_empty() || self.get_node(path).is_none() {
            return Ok(false);
        }

        let mut target = path.clone();
        while target.len() > 1 {
            let mut parent = target.clone();
            parent.trim_right(1);
            match self.get_node(&parent) {
                Some(node) if key_count(node) == 1 => target = parent,
                _ => break,
            }
        }
        self.unset_key(&target, splice, on_change)
    }

    /// Remove the node at `from` and place it at `to`.
    ///
    /// A target that cannot be written fails before the source is touched.
    pub fn move_node(
        &mut self,
        from: &Path,
        to: &Path,
        on_change: Option<ChangeHandler<'_>>,
    ) -> Result<bool, TreeError> {
        if from == to {
            return Ok(false);
        }
        let Some(node) = self.get_node(from).cloned() else {
            return Ok(false);
        };
        if !to.is_relative_to(from) {
            self.check_writable(to)?;
        }

        let removed = self.remove(from, false)?;
        let placed = self.place(to, node)?;
        let affected: Vec<Path> = removed.into_iter().chain(placed).collect();
        if affected.is_empty() {
            return Ok(false);
        }
        tracing::debug!(target: "tree_query::tree", from = %from, to = %to, op = "move", "node changed");
        self.notify(on_change, &affected);
        Ok(true)
    }

    /// Walk the nodes matched by `query`.
    pub fn traverse_by_query<'t, F>(&'t self, query: &Query, handler: F) -> WalkStats
    where
        F: for<'p> FnMut(&mut Visit<'t, 'p>),
    {
        RecursiveTreeWalker::new(handler)
            .with_query(query)
            .walk(&self.items)
    }

    /// Walk every node below the root.
    pub fn traverse_all_nodes<'t, F>(&'t self, handler: F) -> WalkStats
    where
        F: for<'p> FnMut(&mut Visit<'t, 'p>),
    {
        IterativeTreeWalker::new(handler).walk(&self.items)
    }

    /// Nodes matched by `query`, in traversal order.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use tree_query::{Query, Tree};
    ///
    /// let tree = Tree::new(json!({"user": {"1": {"tags": ["x", "y"]}}}));
    /// let query: Query = "user>|>tags>|".parse().unwrap();
    /// assert_eq!(tree.query_values(&query), vec![&json!("x"), &json!("y")]);
    /// ```
    pub fn query_values(&self, query: &Query) -> Vec<&Value> {
        let mut values = Vec::new();
        self.traverse_by_query(query, |visit| values.push(visit.current_node()));
        values
    }

    /// Keys of the matched nodes. A root match contributes nothing.
    pub fn query_keys(&self, query: &Query) -> Vec<String> {
        let mut keys = Vec::new();
        self.traverse_by_query(query, |visit| {
            if let Some(key) = visit.current_key() {
                keys.push(key.to_string());
            }
        });
        keys
    }

    pub fn query_paths(&self, query: &Query) -> Vec<Path> {
        let mut paths = Vec::new();
        self.traverse_by_query(query, |visit| paths.push(visit.current_path()));
        paths
    }

    /// Matched nodes by key. A later match replaces an earlier one with the
    /// same key.
    pub fn query_key_value_pairs(&self, query: &Query) -> IndexMap<String, &Value> {
        let mut pairs = IndexMap::new();
        self.traverse_by_query(query, |visit| {
            if let Some(key) = visit.current_key() {
                pairs.insert(key.to_string(), visit.current_node());
            }
        });
        pairs
    }

    pub fn query_path_value_pairs(&self, query: &Query) -> IndexMap<Path, &Value> {
        let mut pairs = IndexMap::new();
        self.traverse_by_query(query, |visit| {
            pairs.insert(visit.current_path(), visit.current_node());
        });
        pairs
    }

    // Fails where `place` would: a primitive root or a non-index key under
    // an array. Below the first missing or primitive step everything is
    // created as objects.
    fn check_writable(&self, path: &Path) -> Result<(), TreeError> {
        let mut node = &self.items;
        for key in path.iter() {
            match node {
                Value::Object(_) => {}
                Value::Array(_) => {
                    array_index(key).ok_or(TreeError::InvalidIndex)?;
                }
                _ => return Err(TreeError::NotAContainer),
            }
            match child(node, key) {
                Some(next) if is_container(next) => node = next,
                _ => return Ok(()),
            }
        }
        Ok(())
    }

    // Returns the topmost created path.
    fn vivify(&mut self, path: &Path) -> Result<Option<Path>, TreeError> {
        let mut created: Option<Path> = None;
        let mut node = &mut self.items;
        for (depth, key) in path.iter().enumerate() {
            if !child(node, key).is_some_and(is_container) {
                insert_child(node, key, Value::Object(Map::new()))?;
                if created.is_none() {
                    created = Some(Path::new(path.keys()[..=depth].to_vec()));
                }
            }
            node = child_mut(node, key).ok_or(TreeError::NotFound)?;
        }
        Ok(created)
    }

    fn place(&mut self, path: &Path, value: Value) -> Result<Option<Path>, TreeError> {
        if self.get_node(path) == Some(&value) {
            return Ok(None);
        }
        let Some(key) = path.get_last_key() else {
            self.items = value;
            return Ok(Some(Path::root()));
        };

        let mut parent_path = path.clone();
        parent_path.trim_right(1);
        let created = self.vivify(&parent_path)?;
        let parent = self.get_node_mut(&parent_path).ok_or(TreeError::NotFound)?;
        let introduced = insert_child(parent, key, value)?;

        Ok(Some(match created {
            Some(created) => created.parent().unwrap_or_default(),
            None if introduced => parent_path,
            None => path.clone(),
        }))
    }

    fn remove(&mut self, path: &Path, splice: bool) -> Result<Option<Path>, TreeError> {
        let Some(key) = path.get_last_key() else {
            return Ok(None);
        };
        let mut parent_path = path.clone();
        parent_path.trim_right(1);
        let Some(parent) = self.get_node_mut(&parent_path) else {
            return Ok(None);
        };

        match parent {
            Value::Object(map) => Ok(map.shift_remove(key).map(|_| parent_path)),
            Value::Array(arr) => {
                let Some(index) = array_index(key).filter(|&i| i < arr.len()) else {
                    return Ok(None);
                };
                if splice {
                    arr.remove(index);
                    Ok(Some(parent_path))
                } else if arr[index].is_null() {
                    Ok(None)
                } else {
                    arr[index] = Value::Null;
                    Ok(Some(path.clone()))
                }
            }
            _ => Ok(None),
        }
    }

    fn finish(
        &self,
        op: &'static str,
        on_change: Option<ChangeHandler<'_>>,
        affected: Option<Path>,
    ) -> bool {
        let Some(affected) = affected else {
            return false;
        };
        tracing::debug!(target: "tree_query::tree", path = %affected, op, "node changed");
        self.notify(on_change, &[affected]);
        true
    }

    fn notify(&self, handler: Option<ChangeHandler<'_>>, affected: &[Path]) {
        if let Some(handler) = handler {
            for path in affected {
                handler(path, self.get_node(path));
            }
        }
    }
}

// Returns whether `key` is new to `node`.
fn insert_child(node: &mut Value, key: &str, value: Value) -> Result<bool, TreeError> {
    match node {
        Value::Object(map) => Ok(map.insert(key.to_string(), value).is_none()),
        Value::Array(arr) => {
            let index = array_index(key).ok_or(TreeError::InvalidIndex)?;
            if index < arr.len() {
                arr[index] = value;
                Ok(false)
            } else {
                arr.resize(index, Value::Null);
                arr.push(value);
                Ok(true)
            }
        }
        _ => Err(TreeError::NotAContainer),
    }
}
