//! Locale tree representation and ordering

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};

/// A nested locale namespace: string keys mapping to subtrees or leaf values
///
/// Insertion order is preserved (serde_json `preserve_order`), so the order
/// fragments were discovered in is visible until [`sort_keys`] runs.
pub type LocaleTree = Map<String, Value>;

/// Return a copy of `tree` with keys ascending at every nesting level
///
/// Leaves pass through unchanged. Objects nested in arrays are sorted too.
/// Sorting an already sorted tree yields an identical tree.
pub fn sort_keys(tree: LocaleTree) -> LocaleTree {
    let mut entries: Vec<(String, Value)> = tree.into_iter().collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    entries
        .into_iter()
        .map(|(key, value)| (key, sort_value(value)))
        .collect()
}

fn sort_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sort_keys(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(sort_value).collect()),
        leaf => leaf,
    }
}

/// Check whether every mapping in `tree` has ascending keys
#[cfg(test)]
pub fn is_sorted(tree: &LocaleTree) -> bool {
    let keys_ordered = tree
        .keys()
        .zip(tree.keys().skip(1))
        .all(|(a, b)| a <= b);

    keys_ordered && tree.values().all(value_is_sorted)
}

#[cfg(test)]
fn value_is_sorted(value: &Value) -> bool {
    match value {
        Value::Object(map) => is_sorted(map),
        Value::Array(items) => items.iter().all(value_is_sorted),
        _ => true,
    }
}

/// Count keys (at any depth) that end with `suffix`
///
/// Subtrees under a matching key are not descended into: a whole new
/// namespace awaiting translation counts once. An empty suffix never matches.
pub fn count_suffixed_keys(tree: &LocaleTree, suffix: &str) -> usize {
    if suffix.is_empty() {
        return 0;
    }

    tree.iter()
        .map(|(key, value)| {
            if key.ends_with(suffix) {
                1
            } else if let Value::Object(child) = value {
                count_suffixed_keys(child, suffix)
            } else {
                0
            }
        })
        .sum()
}

/// Count leaf values in `tree`
pub fn leaf_count(tree: &LocaleTree) -> usize {
    tree.values()
        .map(|value| match value {
            Value::Object(child) => leaf_count(child),
            _ => 1,
        })
        .sum()
}

/// Serialize `tree` as JSON indented by `indent_size` spaces
///
/// An indent of 0 produces compact single-line output.
pub fn to_json_bytes(tree: &LocaleTree, indent_size: usize) -> serde_json::Result<Vec<u8>> {
    if indent_size == 0 {
        return serde_json::to_vec(tree);
    }

    let indent = " ".repeat(indent_size);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    tree.serialize(&mut serializer)?;

    Ok(buf)
}
