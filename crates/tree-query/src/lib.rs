//! Query-guided traversal and path-addressed mutation of nested trees.
//!
//! Trees are plain [`serde_json::Value`]s: objects and arrays are the
//! containers, everything else (`null` included) is a leaf. Array elements
//! are addressed by their decimal index.
//!
//! - [`Tree`] wraps a root value with path-based CRUD and query collectors.
//! - [`RecursiveTreeWalker`] visits the nodes matched by a [`Query`].
//! - [`IterativeTreeWalker`] visits every node.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tree_query::{Path, Query, Tree};
//!
//! let mut tree = Tree::new(json!({
//!     "user": {"1": {"name": "Ann", "tags": {"0": "x", "1": "y"}}}
//! }));
//!
//! let query: Query = "user>|>tags>|".parse().unwrap();
//! assert_eq!(tree.query_values(&query), vec![&json!("x"), &json!("y")]);
//!
//! let path: Path = "user>2>name".parse().unwrap();
//! tree.set_node(&path, json!("Bob"), None).unwrap();
//! assert_eq!(tree.get_node(&path), Some(&json!("Bob")));
//! ```

use thiserror::Error;

pub use tree_query_path::*;

mod walker;
pub use walker::{TreeWalker, Visit, WalkStats};

mod iterative;
pub use iterative::IterativeTreeWalker;

mod recursive;
pub use recursive::RecursiveTreeWalker;

mod tree;
pub use tree::{ChangeHandler, Tree};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("NOT_FOUND")]
    NotFound,
    /// A non-index key was used to create an array element.
    #[error("INVALID_INDEX")]
    InvalidIndex,
    #[error("NOT_A_CONTAINER")]
    NotAContainer,
}
