use crate::PathError;

/// Percent-encode a single key for use in a serialized path or query.
///
/// Everything outside `A-Z a-z 0-9 - _ . ~` is escaped, which covers every
/// reserved character of the notation.
///
/// # Example
///
/// ```
/// use tree_query_path::encode_key;
///
/// assert_eq!(encode_key("a>b"), "a%3Eb");
/// assert_eq!(encode_key("|"), "%7C");
/// assert_eq!(encode_key("plain"), "plain");
/// ```
pub fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

/// Percent-decode a single serialized key.
///
/// # Errors
///
/// Returns `PathError::InvalidEncoding` if the escapes decode to invalid UTF-8.
///
/// # Example
///
/// ```
/// use tree_query_path::decode_key;
///
/// assert_eq!(decode_key("a%3Eb").unwrap(), "a>b");
/// assert_eq!(decode_key("caf%C3%A9").unwrap(), "café");
/// assert!(decode_key("%FF").is_err());
/// ```
pub fn decode_key(segment: &str) -> Result<String, PathError> {
    if !segment.contains('%') {
        return Ok(segment.to_string());
    }
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| PathError::InvalidEncoding(segment.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reserved_characters() {
        assert_eq!(encode_key("^"), "%5E");
        assert_eq!(encode_key("<"), "%3C");
        assert_eq!(encode_key("\\"), "%5C");
        assert_eq!(encode_key("\""), "%22");
        assert_eq!(encode_key("{x}"), "%7Bx%7D");
        assert_eq!(encode_key("[x]"), "%5Bx%5D");
    }

    #[test]
    fn test_decode_passes_plain_text_through() {
        assert_eq!(decode_key("").unwrap(), "");
        assert_eq!(decode_key("user").unwrap(), "user");
    }

    #[test]
    fn test_decode_space() {
        assert_eq!(decode_key("a%20b").unwrap(), "a b");
    }
}
