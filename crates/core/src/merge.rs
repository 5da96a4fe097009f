//! The merge pass
//!
//! One pass discovers fragments, loads them into per-filename trees,
//! reconciles the configured files against the target tree and writes every
//! result with sorted keys. Nothing is written until every fragment has been
//! read and parsed, so a broken fragment leaves the previous output intact.
//!
//! The merger holds no run-in-progress guard. Callers that may trigger
//! overlapping passes must serialize them.

use crate::config::MergeConfig;
use crate::discover::discover;
use crate::error::{MergeError, Result};
use crate::fragment::{absolutize, FragmentFile, FragmentLoader};
use crate::output::{atomic_write, read_existing};
use crate::reconcile::{reconcile, strip_untranslated};
use crate::tree::{count_suffixed_keys, leaf_count, sort_keys, to_json_bytes, LocaleTree};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A tree ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct OutputFile {
    /// Output file name, e.g. `en.json`
    pub filename: String,
    /// Destination under the output directory
    pub path: PathBuf,
    /// Sorted tree
    pub tree: LocaleTree,
    /// Produced by reconciliation rather than plain merging
    pub reconciled: bool,
}

/// Everything a pass would write
#[derive(Debug, Clone, Default)]
pub struct MergePlan {
    /// Number of fragments loaded
    pub fragments: usize,
    /// Outputs ordered by file name
    pub outputs: Vec<OutputFile>,
}

/// Summary of one written output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSummary {
    pub filename: String,
    pub path: PathBuf,
    /// Leaf values in the written tree
    pub keys: usize,
    /// Keys carrying the untranslated marker
    pub untranslated: usize,
    pub reconciled: bool,
}

/// Result of a completed pass
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub fragments: usize,
    pub outputs: Vec<OutputSummary>,
}

impl MergeReport {
    /// Total untranslated keys across all outputs
    pub fn untranslated(&self) -> usize {
        self.outputs.iter().map(|o| o.untranslated).sum()
    }
}

/// Runs merge passes for one configuration
pub struct Merger {
    config: MergeConfig,
    loader: FragmentLoader,
}

impl Merger {
    /// Create a merger, rejecting configurations without `src` or `dist`
    ///
    /// The base directory is resolved against the working directory here,
    /// so fragments found through a differently spelled `src` still land in
    /// the right namespace.
    pub fn new(config: MergeConfig) -> Result<Self> {
        config.validate()?;
        let loader = FragmentLoader::new(absolutize(&config.base_dir())?);

        Ok(Self { config, loader })
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Directory namespace paths are computed from
    pub fn base_dir(&self) -> &Path {
        self.loader.base()
    }

    /// Run a full pass: plan, then write every output
    pub fn merge(&self) -> Result<MergeReport> {
        let plan = self.plan()?;

        // Serialize everything first so a failure cannot leave a half-written set
        let mut rendered = Vec::with_capacity(plan.outputs.len());
        for output in &plan.outputs {
            rendered.push((output, self.render(output)?));
        }

        let mut report = MergeReport {
            fragments: plan.fragments,
            outputs: Vec::with_capacity(rendered.len()),
        };

        for (output, bytes) in rendered {
            atomic_write(&output.path, &bytes)?;
            debug!("Wrote {}", output.path.display());
            report.outputs.push(self.summarize(output));
        }

        info!(
            "Merged {} fragments into {} files ({} untranslated keys)",
            report.fragments,
            report.outputs.len(),
            report.untranslated()
        );

        Ok(report)
    }

    /// Compute all outputs without writing anything
    pub fn plan(&self) -> Result<MergePlan> {
        let paths = discover(&self.config.src)?;
        let fragments = paths
            .iter()
            .map(|path| FragmentFile::read(path))
            .collect::<Result<Vec<_>>>()?;

        let outputs = self.plan_from(&fragments)?;

        Ok(MergePlan {
            fragments: fragments.len(),
            outputs,
        })
    }

    /// Compute outputs for an explicit fragment set
    ///
    /// Prior outputs of reconciled files are still read from the output
    /// directory.
    pub fn plan_from(&self, fragments: &[FragmentFile]) -> Result<Vec<OutputFile>> {
        let groups = self.loader.load(fragments)?;
        Ok(self.build_outputs(groups))
    }

    fn build_outputs(&self, mut groups: BTreeMap<String, LocaleTree>) -> Vec<OutputFile> {
        let auto_merge = &self.config.auto_merge;
        let target = match self.config.reconcile_target() {
            Some(name) => match groups.get(name) {
                Some(tree) => Some(tree.clone()),
                None => {
                    warn!("Reconciliation target {} has no fragments, skipping reconciliation", name);
                    None
                }
            },
            None => None,
        };

        let mut outputs = Vec::new();

        if let Some(target) = &target {
            for filename in &auto_merge.files {
                if !self.config.is_reconciled(filename) {
                    continue;
                }
                if groups.remove(filename).is_some() {
                    warn!(
                        "Fragments for {} are ignored: it is reconciled against {}",
                        filename, auto_merge.target
                    );
                }
                if outputs.iter().any(|o: &OutputFile| &o.filename == filename) {
                    continue;
                }

                let path = self.config.output_path(filename);
                let existing = strip_untranslated(read_existing(&path), &auto_merge.suffix);
                let tree = reconcile(target, &existing, &auto_merge.suffix, auto_merge.safe_mode);

                outputs.push(OutputFile {
                    filename: filename.clone(),
                    path,
                    tree: sort_keys(tree),
                    reconciled: true,
                });
            }
        }

        for (filename, tree) in groups {
            outputs.push(OutputFile {
                path: self.config.output_path(&filename),
                filename,
                tree: sort_keys(tree),
                reconciled: false,
            });
        }

        outputs.sort_by(|a, b| a.filename.cmp(&b.filename));
        outputs
    }

    /// Serialize an output with the configured indentation
    pub fn render(&self, output: &OutputFile) -> Result<Vec<u8>> {
        to_json_bytes(&output.tree, self.config.indent_size).map_err(|source| {
            MergeError::Serialize {
                filename: output.filename.clone(),
                source,
            }
        })
    }

    fn summarize(&self, output: &OutputFile) -> OutputSummary {
        OutputSummary {
            filename: output.filename.clone(),
            path: output.path.clone(),
            keys: leaf_count(&output.tree),
            untranslated: count_suffixed_keys(&output.tree, &self.config.auto_merge.suffix),
            reconciled: output.reconciled,
        }
    }
}
