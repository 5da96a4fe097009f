//! `lmerge run` end to end

use crate::common::TestProject;
use anyhow::Result;
use serde_json::json;

#[test]
fn test_run_merges_root_fragments() -> Result<()> {
    let project = TestProject::new();
    project
        .fragment("en.json", r#"{"hello": "Hi"}"#)
        .fragment("zh.json", r#"{"hello": "你好"}"#);

    let result = crate::lmerge!(
        project.root(),
        "run",
        "--src",
        "locale/**/*.json",
        "--dist",
        "dist"
    )
    .assert_success()?;

    assert!(result.contains_stdout("en.json"));
    assert_eq!(project.read_output("en.json"), json!({"hello": "Hi"}));
    assert_eq!(project.read_output("zh.json"), json!({"hello": "你好"}));

    Ok(())
}

#[test]
fn test_run_with_config_file_reconciles() -> Result<()> {
    let project = TestProject::new();
    project
        .fragment("en.json", r#"{"a": "1", "b": "2"}"#)
        .fragment("menu/en.json", r#"{"open": "Open"}"#)
        .output("zh.json", r#"{"a": "甲", "c": "丙"}"#)
        .config(
            r#"
src = "locale/**/*.json"
dist = "dist"

[auto_merge]
target = "en.json"
files = ["zh.json"]
safe_mode = true
"#,
        );

    let result = crate::lmerge!(project.root(), "run").assert_success()?;

    assert!(result.contains_stdout("untranslated"));
    assert_eq!(
        project.read_output("zh.json"),
        json!({"a": "甲", "b__<<<": "2", "c": "丙", "menu__<<<": {"open": "Open"}})
    );
    assert_eq!(
        project.read_output("en.json"),
        json!({"a": "1", "b": "2", "menu": {"open": "Open"}})
    );

    Ok(())
}

#[test]
fn test_run_flags_override_config() -> Result<()> {
    let project = TestProject::new();
    project
        .fragment("en.json", r#"{"a": "1", "b": "2"}"#)
        .output("zh.json", r#"{"a": "甲"}"#)
        .config("src = \"locale/**/*.json\"\ndist = \"dist\"\n");

    crate::lmerge!(
        project.root(),
        "run",
        "--target",
        "en.json",
        "--files",
        "zh.json",
        "--suffix",
        "_TODO"
    )
    .assert_success()?;

    assert_eq!(project.read_output("zh.json"), json!({"a": "甲", "b_TODO": "2"}));

    Ok(())
}

#[test]
fn test_run_fails_on_malformed_fragment() -> Result<()> {
    let project = TestProject::new();
    project
        .fragment("en/app.json", r#"{"ok": true}"#)
        .fragment("en/common.json", r#"{"broken": "#);

    let result = crate::lmerge!(
        project.root(),
        "run",
        "--src",
        "locale/**/*.json",
        "--dist",
        "dist"
    )
    .assert_failure()?;

    assert!(result.contains_stderr("en/common.json"));
    assert!(!project.output_exists("app.json"));

    Ok(())
}

#[test]
fn test_run_requires_src_and_dist() -> Result<()> {
    let project = TestProject::new();

    let result = crate::lmerge!(project.root(), "run", "--src", "locale/**/*.json").assert_failure()?;
    assert!(result.contains_stderr("dist"));

    Ok(())
}

#[test]
fn test_run_with_mixed_path_spellings() -> Result<()> {
    let project = TestProject::new();
    project
        .fragment("en/app.json", r#"{"title": "App"}"#)
        .fragment("zh/app.json", r#"{"title": "应用"}"#)
        .fragment("ja/app.json", r#"{"title": "アプリ"}"#);

    crate::lmerge!(
        project.root(),
        "run",
        "--src",
        "./locale/{en,zh}/*.json",
        "--base",
        "locale",
        "--dist",
        "dist"
    )
    .assert_success()?;

    assert_eq!(
        project.read_output("app.json"),
        json!({"en": {"title": "App"}, "zh": {"title": "应用"}})
    );

    Ok(())
}
