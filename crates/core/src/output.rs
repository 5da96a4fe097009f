//! Output directory access: whole-file writes and prior output reads

use crate::error::{MergeError, Result};
use crate::tree::LocaleTree;
use serde_json::Value;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::warn;

/// Atomic write helper
///
/// Writes data to a temporary file next to `target`, syncs it, then renames
/// it over the target. Readers see either the old file or the new one.
pub fn atomic_write(target: &Path, data: &[u8]) -> Result<()> {
    let write_err = |source: io::Error| MergeError::Write {
        path: target.to_path_buf(),
        source,
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(data).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(target).map_err(|e| write_err(e.error))?;

    Ok(())
}

/// Read a previously written output file as a tree
///
/// A missing file is the normal first-run case and yields an empty tree.
/// An unreadable or malformed file is logged and also yields an empty tree:
/// a broken prior output must never block regeneration.
pub fn read_existing(path: &Path) -> LocaleTree {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return LocaleTree::new(),
        Err(e) => {
            warn!("Failed to read existing translation {}: {}", path.display(), e);
            return LocaleTree::new();
        }
    };

    if content.trim().is_empty() {
        return LocaleTree::new();
    }

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(tree)) => tree,
        Ok(_) => {
            warn!(
                "Existing translation {} is not a JSON object, treating it as empty",
                path.display()
            );
            LocaleTree::new()
        }
        Err(e) => {
            warn!(
                "Existing translation {} is not valid JSON, treating it as empty: {}",
                path.display(),
                e
            );
            LocaleTree::new()
        }
    }
}
