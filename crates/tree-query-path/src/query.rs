//! Pattern sequences.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

use crate::pattern::KeyValuePattern;
use crate::syntax::{PATH_SEPARATOR, QUERY_RESERVED};
use crate::{Path, PatternError};

/// An ordered sequence of patterns, one per tree level.
///
/// A query made only of literal keys addresses exactly the path with those
/// keys. Skip patterns let the sequence float over any number of levels.
///
/// # Example
///
/// ```
/// use tree_query_path::{Path, Query};
///
/// let query: Query = r"a>\>d".parse().unwrap();
/// assert!(query.matches_path(&"a>b>c>d".parse::<Path>().unwrap()));
/// assert!(query.matches_path(&"a>d".parse::<Path>().unwrap()));
/// assert!(!query.matches_path(&"x>d".parse::<Path>().unwrap()));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    patterns: Vec<KeyValuePattern>,
}

impl Query {
    pub fn new(patterns: Vec<KeyValuePattern>) -> Self {
        Self { patterns }
    }

    /// `\>"`: every primitive leaf of the tree.
    ///
    /// This is the query a walker falls back to when none is given.
    pub fn leaves() -> Self {
        Self::new(vec![KeyValuePattern::skip(), KeyValuePattern::primitive()])
    }

    /// Check whether a string uses any query notation. Strings that do not
    /// are plain paths.
    pub fn is_query_string(input: &str) -> bool {
        input.contains(QUERY_RESERVED)
    }

    /// Parse a `>`-separated query.
    ///
    /// # Errors
    ///
    /// Propagates the first [`PatternError`] of any segment.
    pub fn parse(input: &str) -> Result<Self, PatternError> {
        if !Self::is_query_string(input) {
            return Ok(Path::parse(input)?.into());
        }
        input
            .split(PATH_SEPARATOR)
            .map(KeyValuePattern::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Build a query from JSON: a notation string, or an array of pattern
    /// descriptors (see [`KeyValuePattern::from_json`]).
    ///
    /// # Example
    ///
    /// ```
    /// use tree_query_path::Query;
    /// use serde_json::json;
    ///
    /// let query = Query::from_json(&json!(["user", {"symbol": "|"}, ["name", "age"]])).unwrap();
    /// assert_eq!(query.to_string(), "user>|>name<age");
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, PatternError> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Array(items) => items
                .iter()
                .map(KeyValuePattern::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Self::new),
            other => Err(PatternError::InvalidDescriptor(other.to_string())),
        }
    }

    pub fn patterns(&self) -> &[KeyValuePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn push(&mut self, pattern: KeyValuePattern) -> &mut Self {
        self.patterns.push(pattern);
        self
    }

    pub fn append(&mut self, other: &Query) -> &mut Self {
        self.patterns.extend(other.patterns.iter().cloned());
        self
    }

    /// The longest prefix made only of literal keys.
    ///
    /// # Example
    ///
    /// ```
    /// use tree_query_path::{Path, Query};
    ///
    /// let query: Query = "user>1>|>name".parse().unwrap();
    /// assert_eq!(query.get_stem_path(), Path::from(["user", "1"]));
    /// ```
    pub fn get_stem_path(&self) -> Path {
        self.patterns
            .iter()
            .map_while(|p| p.as_literal().map(str::to_string))
            .collect()
    }

    /// Check whether a concrete path satisfies the pattern sequence.
    ///
    /// Matching is a single left-to-right pass. A skip pattern lets path keys
    /// go by until the next pattern matches; outside skip mode the first
    /// mismatch fails. The path must be used up and every pattern consumed,
    /// except trailing skips, which may match nothing.
    pub fn matches_path(&self, path: &Path) -> bool {
        let keys = path.keys();
        let mut i = 0;
        let mut j = 0;
        let mut skipping = false;

        while i < keys.len() {
            match self.patterns.get(j) {
                Some(pattern) if pattern.is_skipper() => {
                    skipping = true;
                    j += 1;
                }
                Some(pattern) if pattern.matches_key(&keys[i]) => {
                    skipping = false;
                    i += 1;
                    j += 1;
                }
                _ if skipping => i += 1,
                _ => return false,
            }
        }

        self.patterns[j..].iter().all(KeyValuePattern::is_skipper)
    }

    /// Check whether the query matches `path` or any prefix-extension of it,
    /// i.e. whether `path` lies beneath something the query addresses.
    pub fn is_root_of(&self, path: &Path) -> bool {
        let mut extended = self.clone();
        extended.push(KeyValuePattern::skip());
        extended.matches_path(path)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pattern) in self.patterns.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            write!(f, "{}", pattern)?;
        }
        Ok(())
    }
}

impl FromStr for Query {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

impl From<Path> for Query {
    fn from(path: Path) -> Self {
        path.into_keys()
            .into_iter()
            .map(KeyValuePattern::Literal)
            .collect()
    }
}

impl From<Vec<KeyValuePattern>> for Query {
    fn from(patterns: Vec<KeyValuePattern>) -> Self {
        Query::new(patterns)
    }
}

impl FromIterator<KeyValuePattern> for Query {
    fn from_iter<I: IntoIterator<Item = KeyValuePattern>>(iter: I) -> Self {
        Query::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Query {
    type Item = &'a KeyValuePattern;
    type IntoIter = std::slice::Iter<'a, KeyValuePattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.iter()
    }
}

impl Serialize for Query {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Query {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Query::parse(&s).map_err(de::Error::custom)
    }
}
