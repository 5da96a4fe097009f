//! `lmerge config` subcommands

use crate::common::TestProject;
use anyhow::Result;

#[test]
fn test_config_example_is_printed() -> Result<()> {
    let project = TestProject::new();

    let result = crate::lmerge!(project.root(), "config", "example").assert_success()?;

    assert!(result.contains_stdout("[auto_merge]"));
    assert!(result.contains_stdout("[watch]"));

    Ok(())
}

#[test]
fn test_config_show_applies_overrides() -> Result<()> {
    let project = TestProject::new();
    project.config("src = \"locale/**/*.json\"\ndist = \"dist\"\nindent_size = 4\n");

    let result = crate::lmerge!(project.root(), "config", "show", "--dist", "public").assert_success()?;

    assert!(result.contains_stdout("lmerge.toml"));
    assert!(result.contains_stdout("dist = \"public\""));
    assert!(result.contains_stdout("indent_size = 4"));
    assert!(result.contains_stdout("debounce_ms = 200"));
    assert!(result.contains_stdout("max_wait_ms = 2000"));

    Ok(())
}
