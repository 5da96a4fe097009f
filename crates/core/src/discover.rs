//! Fragment discovery by glob pattern

use crate::error::{MergeError, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Find every file matching `pattern`, sorted by path
///
/// Only the literal directory prefix of the pattern is walked. A missing
/// prefix directory yields no files rather than an error. Brace
/// alternatives (`{en,zh}`) are expanded.
pub fn discover(pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = compile(pattern)?;

    let root = literal_prefix(pattern);
    let walk_root = if root.as_os_str().is_empty() {
        Path::new(".")
    } else {
        root.as_path()
    };

    if !walk_root.exists() {
        debug!("Source root {} does not exist", walk_root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(walk_root).follow_links(true) {
        let entry = entry.map_err(|source| MergeError::Walk {
            path: walk_root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        // Paths under an implicit "." root are reported without the prefix
        let path = if root.as_os_str().is_empty() {
            entry.path().strip_prefix(".").unwrap_or(entry.path()).to_path_buf()
        } else {
            entry.into_path()
        };

        if matcher.is_match(&path) {
            files.push(path);
        }
    }

    files.sort();
    debug!("Discovered {} fragments for {}", files.len(), pattern);
    Ok(files)
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        // `*` stays within one directory, `**` crosses them
        .literal_separator(true)
        .build()
        .map_err(|source| MergeError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

    Ok(glob.compile_matcher())
}

/// Leading path components of `pattern` that contain no glob syntax
///
/// The final component is dropped when it is literal too, since it names a
/// file rather than a directory to walk.
pub fn literal_prefix(pattern: &str) -> PathBuf {
    let path = Path::new(pattern);
    let mut prefix = PathBuf::new();
    let mut components = path.components().peekable();

    while let Some(component) = components.next() {
        let is_last = components.peek().is_none();
        match component {
            Component::Normal(part) => {
                let part = part.to_string_lossy();
                if is_last || part.contains(['*', '?', '[', '{']) {
                    break;
                }
                prefix.push(&*part);
            }
            other => prefix.push(other.as_os_str()),
        }
    }

    prefix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_literal_prefix() {
        assert_eq!(literal_prefix("locale/**/*.json"), PathBuf::from("locale"));
        assert_eq!(literal_prefix("a/b/*.json"), PathBuf::from("a/b"));
        assert_eq!(literal_prefix("/abs/dir/**/*.json"), PathBuf::from("/abs/dir"));
        assert_eq!(literal_prefix("*.json"), PathBuf::new());
        assert_eq!(literal_prefix("locale/en.json"), PathBuf::from("locale"));
    }

    #[test]
    fn test_discover_matches_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("locale");
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("en.json"), "{}").unwrap();
        fs::write(root.join("a/b/en.json"), "{}").unwrap();
        fs::write(root.join("a/notes.txt"), "skip").unwrap();

        let pattern = format!("{}/**/*.json", root.display());
        let files = discover(&pattern).unwrap();

        assert_eq!(files, vec![root.join("a/b/en.json"), root.join("en.json")]);
    }

    #[test]
    fn test_single_star_stays_in_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("locale");
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("en.json"), "{}").unwrap();
        fs::write(root.join("nested/en.json"), "{}").unwrap();

        let pattern = format!("{}/*.json", root.display());
        let files = discover(&pattern).unwrap();

        assert_eq!(files, vec![root.join("en.json")]);
    }

    #[test]
    fn test_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = format!("{}/missing/**/*.json", temp_dir.path().display());
        assert!(discover(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_brace_alternatives() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("locale");
        for lang in ["en", "zh", "ja"] {
            fs::create_dir_all(root.join(lang)).unwrap();
            fs::write(root.join(lang).join("app.json"), "{}").unwrap();
        }

        let pattern = format!("{}/{{en,zh}}/*.json", root.display());
        let files = discover(&pattern).unwrap();

        assert_eq!(files, vec![root.join("en/app.json"), root.join("zh/app.json")]);
        assert_eq!(literal_prefix(&pattern), root);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(matches!(discover("locale/[/*.json"), Err(MergeError::Pattern { .. })));
    }
}
