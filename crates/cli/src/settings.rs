//! Settings loading: config file, then command-line overrides

use crate::MergeArgs;
use anyhow::{Context, Result};
use lm_core::MergeConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use watcher::WatchConfig;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "lmerge.toml";

/// Everything a command needs
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub merge: MergeConfig,
    pub watch: WatchConfig,
    /// File the settings were read from, if any
    pub source: Option<PathBuf>,
}

/// The `[watch]` table of the config file
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSection {
    pub watch: WatchConfig,
}

impl Settings {
    /// Load settings
    ///
    /// An explicitly given config file must exist. Without one,
    /// `lmerge.toml` in the working directory is used when present, and
    /// defaults otherwise.
    pub fn load(explicit: Option<&Path>, overrides: &MergeArgs) -> Result<Self> {
        let source = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.exists().then_some(default)
            }
        };

        let mut settings = match &source {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.source = source;
        overrides.apply(&mut settings.merge);

        Ok(settings)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let merge = MergeConfig::load(path)?;

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let section: WatchSection = toml::from_str(&content)
            .with_context(|| format!("Invalid [watch] section in {}", path.display()))?;

        Ok(Self {
            merge,
            watch: section.watch,
            source: None,
        })
    }
}

impl MergeArgs {
    /// Apply command-line values over `config`
    pub fn apply(&self, config: &mut MergeConfig) {
        if let Some(src) = &self.src {
            config.src = src.clone();
        }
        if let Some(dist) = &self.dist {
            config.dist = dist.clone();
        }
        if let Some(base) = &self.base {
            config.base = base.clone();
        }
        if let Some(indent_size) = self.indent_size {
            config.indent_size = indent_size;
        }
        if let Some(target) = &self.target {
            config.auto_merge.target = target.clone();
        }
        if let Some(files) = &self.files {
            config.auto_merge.files = files.clone();
        }
        if let Some(suffix) = &self.suffix {
            config.auto_merge.suffix = suffix.clone();
        }
        if self.safe_mode {
            config.auto_merge.safe_mode = true;
        }
    }
}
