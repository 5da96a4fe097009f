//! Ignore rules for change events under the source root
//!
//! Supports multiple sources of ignore patterns:
//! 1. Built-in patterns (VCS directories, editor temp files - always active)
//! 2. .gitignore in the source root (optional, enabled by default)
//! 3. .lmignore in the source root (locale-merge specific, optional)
//! 4. Config-based patterns (gitignore syntax)

use anyhow::{Context, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Ignore rule manager
///
/// A path is ignored if any source matches it. Negations only apply within
/// the file that declares them.
pub struct IgnoreRules {
    /// Source root directory
    root: PathBuf,

    /// Gitignore patterns (optional)
    gitignore: Option<Gitignore>,

    /// locale-merge specific patterns (optional)
    lmignore: Option<Gitignore>,

    /// Patterns from configuration
    additional: Option<Gitignore>,

    /// Configuration
    config: IgnoreConfig,
}

impl IgnoreRules {
    /// Load ignore rules for a source root
    pub fn load(root: &Path, config: IgnoreConfig) -> Result<Self> {
        let mut rules = Self {
            root: root.to_path_buf(),
            gitignore: None,
            lmignore: None,
            additional: None,
            config,
        };

        rules.reload_ignore_files()?;
        Ok(rules)
    }

    /// Reload ignore files from disk
    ///
    /// This can be called to pick up changes to .gitignore/.lmignore
    pub fn reload_ignore_files(&mut self) -> Result<()> {
        self.gitignore = if self.config.use_gitignore {
            self.build_from_file(".gitignore")?
        } else {
            None
        };

        self.lmignore = if self.config.use_lmignore {
            self.build_from_file(".lmignore")?
        } else {
            None
        };

        self.additional = if self.config.additional_patterns.is_empty() {
            None
        } else {
            let mut builder = GitignoreBuilder::new(&self.root);
            for pattern in &self.config.additional_patterns {
                builder
                    .add_line(None, pattern)
                    .with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
            }
            Some(builder.build()?)
        };

        Ok(())
    }

    fn build_from_file(&self, name: &str) -> Result<Option<Gitignore>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }

        let mut builder = GitignoreBuilder::new(&self.root);
        if let Some(err) = builder.add(&path) {
            return Err(err).with_context(|| format!("Failed to parse {}", path.display()));
        }
        Ok(Some(builder.build()?))
    }

    /// Check if path should be ignored
    ///
    /// Accepts paths relative to the root or absolute paths under it.
    pub fn should_ignore(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);

        // 1. Built-in patterns (always enforced)
        if is_builtin_ignored(relative) {
            return true;
        }

        // Pattern files only describe paths under the root
        if relative.has_root() {
            return false;
        }

        let is_dir = self.root.join(relative).is_dir();

        [&self.lmignore, &self.gitignore, &self.additional]
            .into_iter()
            .flatten()
            .any(|rules| {
                rules
                    .matched_path_or_any_parents(relative, is_dir)
                    .is_ignore()
            })
    }

    /// Get number of active ignore sources
    pub fn active_sources(&self) -> usize {
        1 + [&self.gitignore, &self.lmignore, &self.additional]
            .into_iter()
            .filter(|source| source.is_some())
            .count()
    }

    /// Get source root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Check if path matches built-in ignore patterns
///
/// These are always enforced regardless of configuration
fn is_builtin_ignored(path: &Path) -> bool {
    let in_ignored_dir = path.components().any(|component| {
        matches!(
            component.as_os_str().to_str(),
            Some(".git" | ".hg" | ".svn" | ".jj" | "node_modules" | ".idea" | ".vscode")
        )
    });
    if in_ignored_dir {
        return true;
    }

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    matches_editor_temp(filename)
}

/// Check if a file name looks like an editor temporary or system file
///
/// Covers: Vim, Emacs, JetBrains safe-write, MacOS/Windows system files
fn matches_editor_temp(filename: &str) -> bool {
    // Vim swap files (.swp, .swo, .swn, .swx)
    if filename.ends_with(".swp")
        || filename.ends_with(".swo")
        || filename.ends_with(".swn")
        || filename.ends_with(".swx") {
        return true;
    }

    // Vim/Emacs backup files (~)
    if filename.ends_with('~') {
        return true;
    }

    // Emacs auto-save (#*#) and lock files (.#*)
    if (filename.starts_with('#') && filename.ends_with('#')) || filename.starts_with(".#") {
        return true;
    }

    // JetBrains safe-write temp files
    if filename.ends_with("___jb_tmp___") || filename.ends_with("___jb_old___") {
        return true;
    }

    // MacOS and Windows system files
    filename == ".DS_Store"
        || filename.starts_with("._")
        || filename == "Thumbs.db"
        || filename == "desktop.ini"
}

/// Ignore configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreConfig {
    /// Use .gitignore patterns (default: true)
    #[serde(default = "default_true")]
    pub use_gitignore: bool,

    /// Use .lmignore patterns (default: true)
    #[serde(default = "default_true")]
    pub use_lmignore: bool,

    /// Additional patterns from config
    #[serde(default)]
    pub additional_patterns: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            use_gitignore: true,
            use_lmignore: true,
            additional_patterns: vec![],
        }
    }
}

fn default_true() -> bool {
    true
}
