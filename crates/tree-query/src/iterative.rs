//! Unguided depth-first traversal.

use serde_json::Value;
use tree_query_util::{child, is_container, KeySet};

use crate::walker::{call_handler, TreeWalker, Visit, WalkStats};

struct Frame<'t> {
    node: &'t Value,
    keys: Vec<String>,
    index: usize,
}

impl<'t> Frame<'t> {
    fn of(node: &'t Value) -> Self {
        Self {
            node,
            keys: KeySet::of_node(node).into_vec(),
            index: 0,
        }
    }
}

/// Visits every node below the root exactly once, pre-order.
///
/// The walk keeps its own stack of frames, so tree depth is limited only by
/// memory.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tree_query::{IterativeTreeWalker, TreeWalker};
///
/// let tree = json!({"a": {"b": 1}, "c": [2, 3]});
/// let mut paths = Vec::new();
/// IterativeTreeWalker::new(|visit| paths.push(visit.current_path().to_string()))
///     .walk(&tree);
/// assert_eq!(paths, vec!["a", "a>b", "c", "c>0", "c>1"]);
/// ```
pub struct IterativeTreeWalker<F> {
    handler: F,
}

impl<'t, F> IterativeTreeWalker<F>
where
    F: for<'p> FnMut(&mut Visit<'t, 'p>),
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<'t, F> TreeWalker<'t> for IterativeTreeWalker<F>
where
    F: for<'p> FnMut(&mut Visit<'t, 'p>),
{
    fn walk(&mut self, root: &'t Value) -> WalkStats {
        let mut stats = WalkStats::default();
        let mut path: Vec<String> = Vec::new();
        let mut frames = vec![Frame::of(root)];

        while let Some(frame) = frames.last_mut() {
            if frame.index >= frame.keys.len() {
                frames.pop();
                path.pop();
                if let Some(parent) = frames.last_mut() {
                    parent.index += 1;
                }
                continue;
            }

            let key = frame.keys[frame.index].clone();
            let Some(node) = child(frame.node, &key) else {
                frame.index += 1;
                continue;
            };

            path.push(key);
            call_handler(&mut self.handler, &path, node, &mut stats);
            if stats.terminated {
                break;
            }

            if is_container(node) {
                frames.push(Frame::of(node));
            } else {
                path.pop();
                frame.index += 1;
            }
        }

        tracing::debug!(
            target: "tree_query::walker",
            visited = stats.visited,
            terminated = stats.terminated,
            "full walk finished"
        );
        stats
    }
}
