//! Reserved characters of the path and query notation.

/// Separates keys in a serialized path or query.
pub const PATH_SEPARATOR: char = '>';

/// Separates a pattern's key part from its required value.
pub const VALUE_SEPARATOR: char = '^';

/// Separates enumerated key options.
pub const OPTION_SEPARATOR: char = '<';

/// Matches any key.
pub const SYMBOL_WILDCARD: &str = "|";

/// Matches any key whose value is a primitive.
pub const SYMBOL_PRIMITIVE: &str = "\"";

/// Skips any number of levels until the next pattern matches.
pub const SYMBOL_SKIP: &str = "\\";

pub const MARKER_BRACKET_OPEN: char = '[';
pub const MARKER_BRACKET_CLOSE: char = ']';
pub const MARKER_BRACE_OPEN: char = '{';
pub const MARKER_BRACE_CLOSE: char = '}';

/// Characters whose presence makes a string a query rather than a plain path.
pub const QUERY_RESERVED: [char; 7] = ['^', '<', '|', '"', '\\', '[', '{'];
