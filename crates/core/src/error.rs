//! Error types for the merge pipeline

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Errors that abort a merge pass
#[derive(Debug, Error)]
pub enum MergeError {
    /// A source fragment is not valid JSON
    ///
    /// `path` is relative to the base directory so it can be located quickly.
    #[error("malformed JSON in fragment {path}: {source}")]
    FragmentParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A discovered fragment does not live under the base directory
    #[error("fragment {path} is not under base directory {base}")]
    OutsideBase { path: PathBuf, base: PathBuf },

    /// A fragment path has no final file name
    #[error("fragment path {0} has no file name")]
    NoFileName(PathBuf),

    #[error("failed to resolve the working directory")]
    WorkingDir(#[source] io::Error),

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid source pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("failed to scan {path}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to serialize {filename}")]
    Serialize {
        filename: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration problems, reported before any merge runs
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required option was empty or absent
    #[error("missing required option `{0}`")]
    Missing(&'static str),

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
