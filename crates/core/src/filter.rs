//! Deep filtering over nested JSON values

use crate::tree::LocaleTree;
use serde_json::Value;

/// Recursively drop entries for which `predicate` returns false
///
/// The predicate receives `(value, key, dotted_path)` for every entry of every
/// object and array, and runs before the entry is descended into. A rejected
/// entry is removed with its whole subtree; a kept container is replaced by its
/// filtered form. Array indices act as keys and arrays are compacted.
///
/// Values that are not containers are returned unchanged.
pub fn filter_deep<F>(value: Value, mut predicate: F) -> Value
where
    F: FnMut(&Value, &str, &str) -> bool,
{
    filter_value(value, "", &mut predicate)
}

/// [`filter_deep`] for a tree root
pub fn filter_tree<F>(tree: LocaleTree, mut predicate: F) -> LocaleTree
where
    F: FnMut(&Value, &str, &str) -> bool,
{
    filter_map(tree, "", &mut predicate)
}

fn filter_value<F>(value: Value, parent: &str, predicate: &mut F) -> Value
where
    F: FnMut(&Value, &str, &str) -> bool,
{
    match value {
        Value::Object(map) => Value::Object(filter_map(map, parent, predicate)),
        Value::Array(items) => {
            let mut kept = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                let key = index.to_string();
                let path = join_path(parent, &key);
                if predicate(&item, &key, &path) {
                    kept.push(filter_value(item, &path, predicate));
                }
            }
            Value::Array(kept)
        }
        leaf => leaf,
    }
}

fn filter_map<F>(map: LocaleTree, parent: &str, predicate: &mut F) -> LocaleTree
where
    F: FnMut(&Value, &str, &str) -> bool,
{
    let mut kept = LocaleTree::new();
    for (key, value) in map {
        let path = join_path(parent, &key);
        if predicate(&value, &key, &path) {
            let value = filter_value(value, &path, predicate);
            kept.insert(key, value);
        }
    }
    kept
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}
