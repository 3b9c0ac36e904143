//! String utilities.
//!
//! Rendering of node values to text.

mod as_text;

pub use as_text::{as_text, text_equals};
