//! Query-guided traversal.

use std::borrow::Cow;

use serde_json::Value;
use tree_query_path::{KeyValuePattern, Query};
use tree_query_util::{child, is_container, KeySet};

use crate::walker::{call_handler, TreeWalker, Visit, WalkStats};

#[derive(Debug, Clone)]
struct Step {
    key: String,
    query_pos: usize,
    skipping: bool,
}

struct Frame<'t> {
    node: &'t Value,
    steps: Vec<Step>,
    next: usize,
    /// An ancestor was matched by an aggregating pattern.
    under_marked: bool,
    /// This node itself was matched by an aggregating pattern.
    aggregates: bool,
    matched: bool,
}

enum Entered<'t> {
    Done(bool),
    Descend(Frame<'t>),
}

/// Walks only the parts of a tree that can satisfy a [`Query`].
///
/// Each query position consumes one level of the tree, except for skip
/// patterns, which consume any number of levels (zero included). A node
/// whose path fully matches the query is handed to the handler.
///
/// Nodes matched by a `{...}` pattern aggregate: the handler sees the
/// marked node once, after its subtree, if anything below it matched. Plain
/// matches below a marked node are not reported; marked nodes nested under
/// it still are.
///
/// Without an explicit query the walker reports every primitive leaf.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use tree_query::{Query, RecursiveTreeWalker, TreeWalker};
///
/// let tree = json!({"user": [{"name": "ann"}, {"name": "bob"}]});
/// let query: Query = "user>|>name".parse().unwrap();
/// let mut names = Vec::new();
/// RecursiveTreeWalker::new(|visit| names.push(visit.current_node().clone()))
///     .with_query(&query)
///     .walk(&tree);
/// assert_eq!(names, vec![json!("ann"), json!("bob")]);
/// ```
pub struct RecursiveTreeWalker<'q, F> {
    query: Cow<'q, Query>,
    handler: F,
}

impl<'q, 't, F> RecursiveTreeWalker<'q, F>
where
    F: for<'p> FnMut(&mut Visit<'t, 'p>),
{
    pub fn new(handler: F) -> Self {
        Self {
            query: Cow::Owned(Query::leaves()),
            handler,
        }
    }

    pub fn with_query(mut self, query: &'q Query) -> Self {
        self.query = Cow::Borrowed(query);
        self
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    fn enter(
        &mut self,
        path: &[String],
        node: &'t Value,
        mut query_pos: usize,
        mut skipping: bool,
        under_marked: bool,
        stats: &mut WalkStats,
    ) -> Entered<'t> {
        let patterns = self.query.patterns();
        let aggregates = query_pos > 0 && patterns[query_pos - 1].is_aggregating();

        while patterns
            .get(query_pos)
            .is_some_and(KeyValuePattern::is_skipper)
        {
            skipping = true;
            query_pos += 1;
        }

        if query_pos == patterns.len() {
            if !under_marked {
                call_handler(&mut self.handler, path, node, stats);
            }
            return Entered::Done(true);
        }

        let admitted = patterns[query_pos].select_keys(node);
        let mut steps: Vec<Step> = admitted
            .iter()
            .map(|key| Step {
                key: key.to_string(),
                query_pos: query_pos + 1,
                skipping: false,
            })
            .collect();
        if skipping {
            let deeper = KeySet::of_node_where(node, |_, value| is_container(value))
                .subtract(&admitted);
            steps.extend(deeper.into_iter().map(|key| Step {
                key,
                query_pos,
                skipping: true,
            }));
        }

        tracing::trace!(
            target: "tree_query::walker",
            depth = path.len(),
            query_pos,
            skipping,
            branches = steps.len(),
            "descend"
        );

        Entered::Descend(Frame {
            node,
            steps,
            next: 0,
            under_marked,
            aggregates,
            matched: false,
        })
    }
}

impl<'q, 't, F> TreeWalker<'t> for RecursiveTreeWalker<'q, F>
where
    F: for<'p> FnMut(&mut Visit<'t, 'p>),
{
    fn walk(&mut self, root: &'t Value) -> WalkStats {
        let mut stats = WalkStats::default();
        let mut path: Vec<String> = Vec::new();
        let mut frames: Vec<Frame<'t>> = Vec::new();

        if let Entered::Descend(frame) = self.enter(&path, root, 0, false, false, &mut stats) {
            frames.push(frame);
        }

        while let Some(frame) = frames.last_mut() {
            if stats.terminated {
                break;
            }

            if frame.next < frame.steps.len() {
                let step = frame.steps[frame.next].clone();
                frame.next += 1;
                let Some(node) = child(frame.node, &step.key) else {
                    continue;
                };
                let under_marked = frame.under_marked || frame.aggregates;

                path.push(step.key);
                match self.enter(
                    &path,
                    node,
                    step.query_pos,
                    step.skipping,
                    under_marked,
                    &mut stats,
                ) {
                    Entered::Done(matched) => {
                        path.pop();
                        frame.matched |= matched;
                    }
                    Entered::Descend(next) => frames.push(next),
                }
                continue;
            }

            let Some(done) = frames.pop() else {
                break;
            };
            if done.aggregates && done.matched {
                call_handler(&mut self.handler, &path, done.node, &mut stats);
            }
            if let Some(parent) = frames.last_mut() {
                parent.matched |= done.matched;
                path.pop();
            }
        }

        tracing::debug!(
            target: "tree_query::walker",
            query = %self.query,
            visited = stats.visited,
            terminated = stats.terminated,
            "query walk finished"
        );
        stats
    }
}
