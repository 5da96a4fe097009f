//! Reconciliation of a freshly merged tree against existing translations
//!
//! The target tree (usually the source language) decides which keys are
//! visited. For each of them:
//! - absent from the existing tree: emitted as `key + suffix` with the
//!   target's value, so a translator can find it
//! - both sides are objects: reconciled recursively
//! - anything else: the existing value is kept verbatim, even when the
//!   types disagree (a translation always wins over the target's shape)
//!
//! Arrays are leaves. When both sides hold one, the existing array is kept
//! whole; elements are never reconciled or marked individually.
//!
//! Keys only present in the existing tree survive in safe mode and are
//! dropped otherwise.

use crate::filter::filter_tree;
use crate::tree::LocaleTree;
use serde_json::Value;

/// Reconcile `target` against `existing`
///
/// An empty `suffix` keeps untranslated keys under their own name.
pub fn reconcile(
    target: &LocaleTree,
    existing: &LocaleTree,
    suffix: &str,
    safe_mode: bool,
) -> LocaleTree {
    let mut output = LocaleTree::new();

    for (key, target_value) in target {
        match (target_value, existing.get(key)) {
            (_, None) => {
                output.insert(format!("{key}{suffix}"), target_value.clone());
            }
            (Value::Object(target_child), Some(Value::Object(existing_child))) => {
                let merged = reconcile(target_child, existing_child, suffix, safe_mode);
                output.insert(key.clone(), Value::Object(merged));
            }
            (_, Some(existing_value)) => {
                output.insert(key.clone(), existing_value.clone());
            }
        }
    }

    if safe_mode {
        for (key, existing_value) in existing {
            if !target.contains_key(key) && !output.contains_key(key) {
                output.insert(key.clone(), existing_value.clone());
            }
        }
    }

    output
}

/// Drop every entry whose key ends with `suffix`
///
/// Used on previously written output so markers from the last run are
/// recomputed rather than treated as translations. An empty suffix marks
/// nothing, so the tree is returned as is.
pub fn strip_untranslated(tree: LocaleTree, suffix: &str) -> LocaleTree {
    if suffix.is_empty() {
        return tree;
    }

    filter_tree(tree, |_, key, _| !key.ends_with(suffix))
}
