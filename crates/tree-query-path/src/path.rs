//! Structural addresses into a tree.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::syntax::PATH_SEPARATOR;
use crate::util::{decode_key, encode_key};
use crate::PathError;

/// An ordered sequence of keys identifying one node in a tree.
///
/// Keys are compared positionally and never re-interpreted. Array positions
/// are carried as their decimal rendering (`"0"`, `"1"`, ...).
///
/// The structural operations (`trim_left`, `append_key`, ...) mutate in
/// place and return `&mut Self` so they chain; clone first to keep the
/// original.
///
/// # Example
///
/// ```
/// use tree_query_path::Path;
///
/// let mut path: Path = "user>1>name".parse().unwrap();
/// assert_eq!(path.get_last_key(), Some("name"));
///
/// path.trim_right(1).append_key("tags");
/// assert_eq!(path.to_string(), "user>1>tags");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    keys: Vec<String>,
}

impl Path {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// The empty path, addressing the root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a `>`-separated path, percent-decoding each key.
    ///
    /// The empty string is the root path. A path holding a single empty key
    /// also renders as `""`, so it comes back from here as the root; that is
    /// the one path for which `parse` does not invert `to_string`.
    ///
    /// # Errors
    ///
    /// Returns `PathError::InvalidEncoding` if a key does not decode to UTF-8.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Ok(Self::root());
        }
        let keys = input
            .split(PATH_SEPARATOR)
            .map(decode_key)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<String> {
        self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get_last_key(&self) -> Option<&str> {
        self.keys.last().map(String::as_str)
    }

    /// The path one level up, or `None` for the root path.
    pub fn parent(&self) -> Option<Path> {
        if self.keys.is_empty() {
            return None;
        }
        Some(Path::new(self.keys[..self.keys.len() - 1].to_vec()))
    }

    /// A copy of this path extended by one key.
    pub fn child(&self, key: impl Into<String>) -> Path {
        let mut out = self.clone();
        out.keys.push(key.into());
        out
    }

    /// Drop `count` keys from the start. Dropping more keys than the path
    /// has leaves the root path.
    pub fn trim_left(&mut self, count: usize) -> &mut Self {
        let count = count.min(self.keys.len());
        self.keys.drain(..count);
        self
    }

    /// Drop `count` keys from the end.
    pub fn trim_right(&mut self, count: usize) -> &mut Self {
        let keep = self.keys.len().saturating_sub(count);
        self.keys.truncate(keep);
        self
    }

    pub fn append(&mut self, other: &Path) -> &mut Self {
        self.keys.extend(other.keys.iter().cloned());
        self
    }

    pub fn append_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.keys.push(key.into());
        self
    }

    pub fn prepend(&mut self, other: &Path) -> &mut Self {
        self.keys.splice(0..0, other.keys.iter().cloned());
        self
    }

    pub fn prepend_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.keys.insert(0, key.into());
        self
    }

    /// Check whether this path starts with every key of `root`.
    ///
    /// A path is relative to itself.
    ///
    /// # Example
    ///
    /// ```
    /// use tree_query_path::Path;
    ///
    /// let root = Path::from(["a", "b"]);
    /// assert!(Path::from(["a", "b", "c"]).is_relative_to(&root));
    /// assert!(Path::from(["a", "b"]).is_relative_to(&root));
    /// assert!(!Path::from(["a", "x", "c"]).is_relative_to(&root));
    /// assert!(!Path::from(["a"]).is_relative_to(&root));
    /// ```
    pub fn is_relative_to(&self, root: &Path) -> bool {
        if root.keys.len() > self.keys.len() {
            return false;
        }
        self.keys.iter().zip(&root.keys).all(|(a, b)| a == b)
    }

    /// Inverse of [`Path::is_relative_to`].
    pub fn is_root_of(&self, relative: &Path) -> bool {
        relative.is_relative_to(self)
    }
}

/// Renders the keys percent-encoded and joined with `>`. Both the root and
/// `[""]` render as the empty string.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            f.write_str(&encode_key(key))?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl From<Vec<String>> for Path {
    fn from(keys: Vec<String>) -> Self {
        Path::new(keys)
    }
}

impl From<&[&str]> for Path {
    fn from(keys: &[&str]) -> Self {
        Path::new(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(keys: [&str; N]) -> Self {
        Path::new(keys.iter().map(|k| k.to_string()).collect())
    }
}

impl FromIterator<String> for Path {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Path::new(iter.into_iter().collect())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Path::parse(&s).map_err(de::Error::custom)
    }
}
