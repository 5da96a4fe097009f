//! `lmerge check` reports stale output without writing

use crate::common::TestProject;
use anyhow::Result;

const CONFIG: &str = "src = \"locale/**/*.json\"\ndist = \"dist\"\n";

#[test]
fn test_check_fails_when_output_missing() -> Result<()> {
    let project = TestProject::new();
    project.fragment("en.json", r#"{"a": "1"}"#).config(CONFIG);

    let result = crate::lmerge!(project.root(), "check").assert_failure()?;

    assert!(result.contains_stdout("missing"));
    assert!(!project.output_exists("en.json"));

    Ok(())
}

#[test]
fn test_check_passes_after_run() -> Result<()> {
    let project = TestProject::new();
    project.fragment("en.json", r#"{"b": "2", "a": "1"}"#).config(CONFIG);

    crate::lmerge!(project.root(), "run").assert_success()?;
    let result = crate::lmerge!(project.root(), "check").assert_success()?;

    assert!(result.contains_stdout("up to date"));

    Ok(())
}

#[test]
fn test_check_shows_diff_for_changed_fragment() -> Result<()> {
    let project = TestProject::new();
    project.fragment("en.json", r#"{"a": "1"}"#).config(CONFIG);
    crate::lmerge!(project.root(), "run").assert_success()?;

    project.fragment("en.json", r#"{"a": "one"}"#);
    let result = crate::lmerge!(project.root(), "check").assert_failure()?;

    assert!(result.contains_stdout("out of date"));
    assert!(result.contains_stdout("\"a\": \"one\""));
    // Output untouched
    assert_eq!(project.read_output("en.json")["a"], "1");

    Ok(())
}
