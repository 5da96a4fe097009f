//! Fragment loading
//!
//! Fragments sharing a file name are merged into one tree. The directories
//! between the base directory and a fragment become nested keys, so
//! `locale/sub/module/en.json` lands in the `en.json` tree under
//! `sub.module`.

use crate::error::{MergeError, Result};
use crate::tree::LocaleTree;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A source fragment: path plus raw text content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentFile {
    pub path: PathBuf,
    pub content: String,
}

impl FragmentFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a fragment from disk
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| MergeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(path, content))
    }
}

/// Builds per-filename trees from fragments
#[derive(Debug, Clone)]
pub struct FragmentLoader {
    /// Root for computing namespace paths
    base: PathBuf,
}

impl FragmentLoader {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Merge `fragments`, in order, into one tree per file name
    ///
    /// Fails on the first fragment that is not valid JSON; the error names
    /// the fragment by its path relative to the base directory.
    pub fn load(&self, fragments: &[FragmentFile]) -> Result<BTreeMap<String, LocaleTree>> {
        let mut groups = BTreeMap::new();

        for fragment in fragments {
            self.apply(&mut groups, fragment)?;
        }

        Ok(groups)
    }

    fn apply(
        &self,
        groups: &mut BTreeMap<String, LocaleTree>,
        fragment: &FragmentFile,
    ) -> Result<()> {
        let (segments, filename) = self.split(&fragment.path)?;
        let relative = segments
            .iter()
            .chain(std::iter::once(&filename))
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/");

        let entries = if fragment.content.trim().is_empty() {
            debug!("Skipping empty fragment {}", relative);
            LocaleTree::new()
        } else {
            let parsed: Value = serde_json::from_str(&fragment.content).map_err(|source| {
                MergeError::FragmentParse {
                    path: relative.clone(),
                    source,
                }
            })?;

            match parsed {
                Value::Object(entries) => {
                    debug!("Loaded {} keys from {}", entries.len(), relative);
                    entries
                }
                other => {
                    warn!(
                        "Skipping fragment {}: expected a JSON object, found {}",
                        relative,
                        json_kind(&other)
                    );
                    LocaleTree::new()
                }
            }
        };

        // The group and its namespaces exist even when nothing is overlaid
        overlay(groups.entry(filename).or_default(), &segments, entries, &relative);
        Ok(())
    }

    /// Split a fragment path into namespace segments and final file name
    ///
    /// Both paths are normalized first, so `./locale/en.json` is under
    /// `locale`. A relative path compared with an absolute one is resolved
    /// against the working directory.
    fn split(&self, path: &Path) -> Result<(Vec<String>, String)> {
        let (path_norm, base_norm) = if path.is_absolute() == self.base.is_absolute() {
            (clean_path(path), clean_path(&self.base))
        } else {
            (absolutize(path)?, absolutize(&self.base)?)
        };

        let relative = path_norm
            .strip_prefix(&base_norm)
            .map_err(|_| MergeError::OutsideBase {
                path: path.to_path_buf(),
                base: self.base.clone(),
            })?;

        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                _ => {
                    return Err(MergeError::OutsideBase {
                        path: path.to_path_buf(),
                        base: self.base.clone(),
                    })
                }
            }
        }

        let filename = parts
            .pop()
            .ok_or_else(|| MergeError::NoFileName(path.to_path_buf()))?;

        Ok((parts, filename))
    }
}

/// Lexically normalize `path`: drop `.` and fold `..` into its parent
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => cleaned.push(Component::ParentDir.as_os_str()),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}

/// Resolve `path` against the working directory and normalize it
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(clean_path(path));
    }

    let cwd = std::env::current_dir().map_err(MergeError::WorkingDir)?;
    Ok(clean_path(&cwd.join(path)))
}

/// Shallow-overlay `entries` onto the namespace at `segments`
///
/// Missing namespaces are created. A scalar already sitting where a
/// namespace is needed is replaced, since a directory always denotes one.
fn overlay(tree: &mut LocaleTree, segments: &[String], entries: LocaleTree, fragment: &str) {
    let Some((head, rest)) = segments.split_first() else {
        for (key, value) in entries {
            tree.insert(key, value);
        }
        return;
    };

    let slot = tree
        .entry(head.clone())
        .or_insert_with(|| Value::Object(LocaleTree::new()));

    if !slot.is_object() {
        warn!(
            "Namespace `{}` from {} replaces a {} value",
            head,
            fragment,
            json_kind(slot)
        );
        *slot = Value::Object(LocaleTree::new());
    }

    if let Value::Object(child) = slot {
        overlay(child, rest, entries, fragment);
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
