use serde_json::{json, Value};
use tree_query::{Path, Query, Tree, TreeError};

fn path(s: &str) -> Path {
    s.parse().unwrap()
}

#[test]
fn scenario_query_values() {
    let tree = Tree::new(json!({
        "user": {"1": {"name": "Ann", "tags": {"0": "x", "1": "y"}}}
    }));
    let query: Query = "user>|>tags>|".parse().unwrap();
    assert_eq!(tree.query_values(&query), vec![&json!("x"), &json!("y")]);
    assert_eq!(tree.query_keys(&query), vec!["0", "1"]);
}

#[test]
fn unset_path_removes_singular_chain() {
    let cases = [
        (
            json!({"a": {"b": {"c": 1}}, "d": 1}),
            "a>b>c",
            json!({"d": 1}),
        ),
        (
            json!({"a": {"b": {"c": 1}, "e": 2}}),
            "a>b>c",
            json!({"a": {"e": 2}}),
        ),
        (
            json!({"a": {"b": {"c": 1, "f": 3}}}),
            "a>b>c",
            json!({"a": {"b": {"f": 3}}}),
        ),
        (json!({"a": [{"b": 1}], "z": 0}), "a>0>b", json!({"z": 0})),
    ];
    for (items, target, expected) in cases {
        let mut tree = Tree::new(items);
        assert!(tree.unset_path(&path(target), true, None).unwrap());
        assert_eq!(tree.items(), &expected, "unset {target}");
    }
}

#[test]
fn set_node_is_idempotent() {
    let mut tree = Tree::default();
    let mut changes = Vec::new();
    let mut record = |p: &Path, node: Option<&Value>| changes.push((p.to_string(), node.cloned()));

    assert!(tree.set_node(&path("a>b"), json!({"c": [1]}), Some(&mut record)).unwrap());
    assert!(!tree.set_node(&path("a>b"), json!({"c": [1]}), Some(&mut record)).unwrap());
    assert_eq!(changes, vec![(String::new(), Some(json!({"a": {"b": {"c": [1]}}})))]);
}

#[test]
fn change_handler_sees_new_state() {
    let mut tree = Tree::new(json!({"a": {"b": 1}}));
    let mut seen = None;
    let mut record = |_: &Path, node: Option<&Value>| seen = node.cloned();
    tree.set_node(&path("a>b"), json!(5), Some(&mut record)).unwrap();
    assert_eq!(seen, Some(json!(5)));
}

#[test]
fn writes_into_arrays() {
    let mut tree = Tree::new(json!({"l": []}));
    tree.set_node(&path("l>1>name"), json!("n"), None).unwrap();
    assert_eq!(tree.items(), &json!({"l": [null, {"name": "n"}]}));
    assert_eq!(
        tree.set_node(&path("l>first"), json!(1), None),
        Err(TreeError::InvalidIndex)
    );
}

#[test]
fn collectors_on_empty_match() {
    let tree = Tree::new(json!({"a": 1}));
    let query: Query = "b>|".parse().unwrap();
    assert!(tree.query_values(&query).is_empty());
    assert!(tree.query_paths(&query).is_empty());
    assert!(tree.query_key_value_pairs(&query).is_empty());
}

#[test]
fn query_by_stem_then_patterns() {
    let tree = Tree::new(json!({
        "orders": {
            "o1": {"status": "open", "total": 5},
            "o2": {"status": "done", "total": 7},
            "o3": {"status": "open", "total": 9}
        }
    }));
    let query: Query = "orders>{|}>status^open".parse().unwrap();
    let open = tree.query_path_value_pairs(&query);
    let keys: Vec<String> = open.keys().map(Path::to_string).collect();
    assert_eq!(keys, vec!["orders>o1", "orders>o3"]);
    assert_eq!(query.get_stem_path(), path("orders"));
}
