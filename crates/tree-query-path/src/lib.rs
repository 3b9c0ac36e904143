//! Tree paths and the key/value pattern query language.
//!
//! A [`Path`] addresses one node in a nested tree of objects and arrays. A
//! [`Query`] is a sequence of [`KeyValuePattern`]s that can address many
//! nodes at once: wildcards, enumerated key options, primitive-only keys,
//! value constraints, skip-until-match, and boundary markers.
//!
//! # Notation
//!
//! Keys are joined with `>` and percent-encoded. Within a query segment:
//!
//! | Text | Meaning |
//! |---|---|
//! | `\|` | any key |
//! | `"` | any key whose value is a primitive |
//! | `\` | skip any number of levels |
//! | `a<b<c` | one of the listed keys |
//! | `key^value` | key whose value equals `value` |
//! | `[...]`, `{...}` | boundary markers; `{` aggregates deeper matches |
//!
//! # Example
//!
//! ```
//! use tree_query_path::{Path, Query};
//!
//! let query: Query = "user>|>tags>|".parse().unwrap();
//! let path: Path = "user>1>tags>0".parse().unwrap();
//! assert!(query.matches_path(&path));
//! assert_eq!(query.get_stem_path().to_string(), "user");
//! ```

use thiserror::Error;

pub mod syntax;

mod util;
pub use util::{decode_key, encode_key};

mod path;
pub use path::Path;

mod pattern;
pub use pattern::{KeyMatcher, KeyValuePattern, Marker, PatternDescriptor};

mod query;
pub use query::Query;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("INVALID_ENCODING: {0}")]
    InvalidEncoding(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("SKIP_WITH_CONSTRAINT")]
    SkipWithConstraint,
    #[error("INVALID_DESCRIPTOR: {0}")]
    InvalidDescriptor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_wraps_path_error() {
        let err = Query::parse("a%FF>|").unwrap_err();
        assert_eq!(
            err,
            PatternError::Path(PathError::InvalidEncoding("a%FF".to_string()))
        );
        assert_eq!(err.to_string(), "INVALID_ENCODING: a%FF");
    }

    #[test]
    fn test_plain_path_encoding_error() {
        assert!(matches!(
            Query::parse("%FF"),
            Err(PatternError::Path(PathError::InvalidEncoding(_)))
        ));
    }
}
