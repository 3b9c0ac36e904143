//! State shared by the tree walkers.

use serde_json::Value;
use tree_query_path::Path;

/// What a walker's handler sees at each reported node.
///
/// A fresh `Visit` is built per handler call, so walkers keep no
/// per-node state of their own and one walker can be reused for any
/// number of walks.
#[derive(Debug)]
pub struct Visit<'t, 'p> {
    path: &'p [String],
    node: &'t Value,
    terminated: bool,
}

impl<'t, 'p> Visit<'t, 'p> {
    pub(crate) fn new(path: &'p [String], node: &'t Value) -> Self {
        Self {
            path,
            node,
            terminated: false,
        }
    }

    /// Key of the current node under its parent. `None` at the root.
    pub fn current_key(&self) -> Option<&'p str> {
        self.path.last().map(String::as_str)
    }

    pub fn current_node(&self) -> &'t Value {
        self.node
    }

    /// Keys from the root down to the current node.
    pub fn path_keys(&self) -> &'p [String] {
        self.path
    }

    pub fn current_path(&self) -> Path {
        Path::new(self.path.to_vec())
    }

    /// Stop the walk. No handler call follows this one.
    pub fn terminate_traversal(&mut self) {
        self.terminated = true;
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

/// Outcome of one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Number of handler calls.
    pub visited: usize,
    /// Whether a handler cut the walk short.
    pub terminated: bool,
}

/// A traversal over a tree rooted at a `serde_json::Value`.
pub trait TreeWalker<'t> {
    /// Walk the tree under `root`, calling the walker's handler.
    fn walk(&mut self, root: &'t Value) -> WalkStats;
}

pub(crate) fn call_handler<'t, F>(
    handler: &mut F,
    path: &[String],
    node: &'t Value,
    stats: &mut WalkStats,
) where
    F: for<'p> FnMut(&mut Visit<'t, 'p>),
{
    if stats.terminated {
        return;
    }
    let mut visit = Visit::new(path, node);
    handler(&mut visit);
    stats.visited += 1;
    stats.terminated = visit.is_terminated();
}
