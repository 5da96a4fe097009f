//! Workflow integration tests
//!
//! Tests for complete workflows that exercise the binary end to end
//! and validate the files it writes.

pub mod check_outdated;
pub mod config_commands;
pub mod merge_run;
