//! Locale fragment merging for locale-merge
//!
//! This crate provides:
//! - Locale trees with deterministic key ordering
//! - Deep filtering with dotted paths
//! - Fragment loading (directory layout becomes a nested namespace)
//! - Reconciliation against previously translated output
//! - The merge pass that ties discovery, loading and writing together

pub mod config;
pub mod discover;
pub mod error;
pub mod filter;
pub mod fragment;
pub mod merge;
pub mod output;
pub mod reconcile;
pub mod tree;

// Re-exports
pub use config::{AutoMergeConfig, MergeConfig, DEFAULT_INDENT_SIZE, DEFAULT_SUFFIX};
pub use error::{ConfigError, MergeError, Result};
pub use filter::filter_deep;
pub use fragment::{FragmentFile, FragmentLoader};
pub use merge::{MergePlan, MergeReport, Merger, OutputFile, OutputSummary};
pub use reconcile::{reconcile, strip_untranslated};
pub use tree::{sort_keys, LocaleTree};
