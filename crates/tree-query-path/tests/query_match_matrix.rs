use serde_json::json;
use tree_query_path::{KeyValuePattern, Marker, Path, Query};

fn matches(query: &str, path: &str) -> bool {
    let q: Query = query
        .parse()
        .unwrap_or_else(|e| panic!("parse failed for '{query}': {e}"));
    let p: Path = path.parse().unwrap();
    q.matches_path(&p)
}

#[test]
fn literal_matrix() {
    let cases = [
        ("a>b>c", "a>b>c", true),
        ("a>b>c", "a>b", false),
        ("a>b", "a>b>c", false),
        ("a>b", "a>x", false),
        ("a%3Eb", "a%3Eb", true),
    ];
    for (query, path, expected) in cases {
        assert_eq!(matches(query, path), expected, "{query} vs {path}");
    }
}

#[test]
fn skip_matrix() {
    let cases = [
        (r"a>\>d", "a>b>c>d", true),
        (r"a>\>d", "a>d", true),
        (r"a>\>d", "a>b>c", false),
        (r"\>d", "d", true),
        (r"\>d", "x>y>d", true),
        (r"\", "", true),
        (r"\", "x>y", true),
        (r"a>\>\>d", "a>b>d", true),
        (r"a>\>b>\", "a>x>b", true),
        (r"a>\>b>\", "a>x>b>y>z", true),
    ];
    for (query, path, expected) in cases {
        assert_eq!(matches(query, path), expected, "{query} vs {path}");
    }
}

#[test]
fn pattern_matrix() {
    let cases = [
        ("|>name", "7>name", true),
        ("\">x", "k>x", true),
        ("a<b<c>d", "b>d", true),
        ("a<b<c>d", "e>d", false),
        ("[a]>{b}", "a>b", true),
        ("a^1>b", "a>b", true),
        ("%7C", "x", false),
        ("%7C", "%7C", true),
    ];
    for (query, path, expected) in cases {
        assert_eq!(matches(query, path), expected, "{query} vs {path}");
    }
}

#[test]
fn descriptor_built_query_matches_like_parsed() {
    let built = Query::new(vec![
        KeyValuePattern::literal("user"),
        KeyValuePattern::wildcard(),
        KeyValuePattern::key("tags")
            .with_marker(Marker::Brace)
            .unwrap(),
        KeyValuePattern::skip(),
        KeyValuePattern::wildcard().with_value(json!("x")).unwrap(),
    ]);
    let parsed: Query = r"user>|>{tags}>\>|^x".parse().unwrap();
    assert_eq!(built, parsed);
    assert!(built.matches_path(&"user>1>tags>0".parse().unwrap()));
}
