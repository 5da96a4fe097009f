//! Merge configuration
//!
//! Loaded from `lmerge.toml` (snake_case keys; the camelCase spellings
//! `indentSize`, `autoMerge` and `safeMode` are accepted as aliases):
//!
//! ```toml
//! src = "locale/**/*.json"
//! dist = "public/i18n"
//! indent_size = 2
//!
//! [auto_merge]
//! target = "en.json"
//! files = ["zh.json", "fr.json"]
//! suffix = "__<<<"
//! safe_mode = false
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default indentation width of written files
pub const DEFAULT_INDENT_SIZE: usize = 2;

/// Default marker appended to keys that still need translating
pub const DEFAULT_SUFFIX: &str = "__<<<";

/// Configuration for one merge pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// Root for namespace paths (empty: derived from `src`)
    pub base: String,

    /// Glob matching fragment files (required)
    pub src: String,

    /// Output directory (required)
    pub dist: PathBuf,

    /// Spaces per indentation level, 0 for compact output
    #[serde(alias = "indentSize")]
    pub indent_size: usize,

    #[serde(alias = "autoMerge")]
    pub auto_merge: AutoMergeConfig,
}

/// Reconciliation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoMergeConfig {
    /// File name whose merged tree is the reference (empty disables)
    pub target: String,

    /// Output file names reconciled against the target
    pub files: Vec<String>,

    /// Marker for untranslated keys (empty: no marking)
    pub suffix: String,

    /// Keep keys that only exist in the previous output
    #[serde(alias = "safeMode")]
    pub safe_mode: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            base: String::new(),
            src: String::new(),
            dist: PathBuf::new(),
            indent_size: DEFAULT_INDENT_SIZE,
            auto_merge: AutoMergeConfig::default(),
        }
    }
}

impl Default for AutoMergeConfig {
    fn default() -> Self {
        Self {
            target: String::new(),
            files: Vec::new(),
            suffix: DEFAULT_SUFFIX.to_string(),
            safe_mode: false,
        }
    }
}

impl MergeConfig {
    pub fn new(src: impl Into<String>, dist: impl Into<PathBuf>) -> Self {
        Self {
            src: src.into(),
            dist: dist.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check required options
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.src.trim().is_empty() {
            return Err(ConfigError::Missing("src"));
        }
        if self.dist.as_os_str().is_empty() {
            return Err(ConfigError::Missing("dist"));
        }
        Ok(())
    }

    /// Directory namespace paths are computed from
    pub fn base_dir(&self) -> PathBuf {
        if self.base.is_empty() {
            derive_base(&self.src)
        } else {
            PathBuf::from(&self.base)
        }
    }

    /// Where the merged tree for `filename` is written
    pub fn output_path(&self, filename: &str) -> PathBuf {
        self.dist.join(filename)
    }

    /// The reconciliation reference file name, if configured
    pub fn reconcile_target(&self) -> Option<&str> {
        let target = self.auto_merge.target.as_str();
        (!target.is_empty()).then_some(target)
    }

    /// Whether `filename` is produced by reconciliation (when a target exists)
    pub fn is_reconciled(&self, filename: &str) -> bool {
        self.reconcile_target() != Some(filename)
            && self.auto_merge.files.iter().any(|f| f == filename)
    }

    /// Annotated example configuration
    pub fn example() -> &'static str {
        r#"# locale-merge configuration

# Glob matching fragment files (required)
src = "locale/**/*.json"

# Output directory (required)
dist = "public/i18n"

# Root for namespace paths; defaults to `src` up to its first wildcard segment
# base = "locale"

# Spaces per indentation level (0 = compact)
indent_size = 2

[auto_merge]
# File whose merged tree is the reference; empty disables reconciliation
target = "en.json"

# Output files reconciled against the target
files = ["zh.json"]

# Appended to keys that still need translating; empty disables marking
suffix = "__<<<"

# Keep keys that only exist in the previous output
safe_mode = false
"#
    }
}

/// Strip a glob down to the directory before its first wildcard segment
///
/// `locale/**/*.json` gives `locale`. A pattern starting with a wildcard
/// gives the current directory (an empty path).
pub fn derive_base(src: &str) -> PathBuf {
    match src.find("/*") {
        Some(index) => PathBuf::from(&src[..index]),
        None if src.starts_with('*') => PathBuf::new(),
        None => PathBuf::from(src),
    }
}
