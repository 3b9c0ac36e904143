//! tree-query-util - host utilities for the tree query engine
//!
//! The traversal engine treats these as collaborators: ordered key sets with
//! set algebra, own-key access on `serde_json::Value` containers, and
//! rendering of node values to text.

pub mod is_empty;
pub mod key_set;
pub mod node;
pub mod strings;

// Re-exports for convenience
pub use is_empty::key_count;
pub use key_set::{count_unique, KeySet};
pub use node::{array_index, child, child_mut, is_container, is_primitive};
pub use strings::{as_text, text_equals};
