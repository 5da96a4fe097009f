//! Locale project fixtures for integration tests

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary project with a `locale/` source tree and `dist/` output
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp_dir.path().join("locale")).expect("Failed to create locale dir");
        Self { temp_dir }
    }

    /// Project root (working directory for commands)
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn dist(&self) -> PathBuf {
        self.root().join("dist")
    }

    /// Write a fragment relative to `locale/`
    pub fn fragment(&self, relative: &str, content: &str) -> &Self {
        let path = self.root().join("locale").join(relative);
        fs::create_dir_all(path.parent().expect("fragment has a parent"))
            .expect("Failed to create fragment dir");
        fs::write(path, content).expect("Failed to write fragment");
        self
    }

    /// Write a file directly into `dist/`
    pub fn output(&self, filename: &str, content: &str) -> &Self {
        fs::create_dir_all(self.dist()).expect("Failed to create dist");
        fs::write(self.dist().join(filename), content).expect("Failed to write output");
        self
    }

    /// Write `lmerge.toml` in the project root
    pub fn config(&self, content: &str) -> &Self {
        fs::write(self.root().join("lmerge.toml"), content).expect("Failed to write config");
        self
    }

    /// Parse an output file
    pub fn read_output(&self, filename: &str) -> Value {
        let content = fs::read_to_string(self.dist().join(filename)).expect("Failed to read output");
        serde_json::from_str(&content).expect("Output is not valid JSON")
    }

    pub fn output_exists(&self, filename: &str) -> bool {
        self.dist().join(filename).exists()
    }
}
