use super::args::CliArgs;
use super::driver::{discover_files, load_registry, run, write_output};
use apidoc_common::{WarningKind, Warnings};
use clap::Parser;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create dirs");
    }
    std::fs::write(&path, value.to_string()).expect("failed to write test file");
    path
}

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["apidoc"];
    argv.extend_from_slice(extra);
    CliArgs::try_parse_from(argv).expect("args should parse")
}

fn widget_docs(dir: &Path) {
    write_json(
        dir,
        "docs/widget.json",
        &json!({
            "name": "Core.Widget",
            "extends": "Titanium.Proxy",
            "summary": "A widget.",
            "properties": [{"name": "title", "type": "String"}],
            "methods": [{"name": "open"}]
        }),
    );
    write_json(
        dir,
        "docs/nested/button.json",
        &json!({
            "Core.Button": {
                "extends": "Core.Widget",
                "methods": [{"name": "open", "parameters": [{"name": "animated"}]}]
            }
        }),
    );
}

#[test]
fn discovers_json_files_recursively_in_name_order() {
    let dir = TempDir::new().expect("temp dir");
    widget_docs(dir.path());
    std::fs::write(dir.path().join("docs/readme.md"), "# notes").expect("write");

    let files = discover_files(&dir.path().join("docs")).expect("discover");

    let names: Vec<String> = files
        .iter()
        .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["button.json", "widget.json"]);
}

#[test]
fn single_file_path_is_used_as_is() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_json(dir.path(), "one.yml.json", &json!({"name": "A"}));

    assert_eq!(discover_files(&path).expect("discover"), vec![path]);
    assert!(discover_files(&dir.path().join("nope")).is_err());
}

#[test]
fn duplicate_classes_across_files_keep_the_first() {
    let dir = TempDir::new().expect("temp dir");
    write_json(dir.path(), "docs/a.json", &json!({"name": "Core.Widget", "summary": "first"}));
    write_json(dir.path(), "docs/b.json", &json!({"name": "Core.Widget", "summary": "second"}));

    let mut warnings = Warnings::new();
    let registry = load_registry(&[dir.path().join("docs")], &mut warnings).expect("load");

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.get("Core.Widget").and_then(|c| c.summary.as_deref()),
        Some("first")
    );
    assert_eq!(warnings.count_of(WarningKind::DuplicateClass), 1);
}

#[test]
fn unparseable_file_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("bad.json"), "{ nope").expect("write");

    let mut warnings = Warnings::new();
    let err = load_registry(&[dir.path().to_path_buf()], &mut warnings).expect_err("bad json");
    assert!(err.to_string().contains("failed to parse"));
}

#[test]
fn run_resolves_registry_to_json() {
    let dir = TempDir::new().expect("temp dir");
    widget_docs(dir.path());
    let docs = dir.path().join("docs");

    let output = run(&args(&[docs.to_str().unwrap()])).expect("run");

    assert_eq!(output.classes, 2);
    assert!(output.warnings.is_empty());
    let methods = output.document["Core.Button"]["methods"]
        .as_array()
        .expect("methods");
    let mut names: Vec<&str> = methods.iter().filter_map(|m| m["name"].as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["getTitle", "open", "setTitle"]);
    assert!(output.document.get("__platform").is_none());
}

#[test]
fn run_merges_addon_docs_and_tags_platform() {
    let dir = TempDir::new().expect("temp dir");
    widget_docs(dir.path());
    write_json(
        dir.path(),
        "addons/widget.json",
        &json!({
            "name": "Core.Widget",
            "summary": "Also on BlackBerry.",
            "platforms": ["blackberry"],
            "methods": [{"name": "close"}]
        }),
    );
    let docs = dir.path().join("docs");
    let addons = dir.path().join("addons");

    let output = run(&args(&[
        "-a",
        addons.to_str().unwrap(),
        "-p",
        "blackberry",
        docs.to_str().unwrap(),
    ]))
    .expect("run");

    let widget = &output.document["Core.Widget"];
    assert_eq!(widget["summary"], json!("A widget. Also on BlackBerry."));
    assert_eq!(widget["since"]["blackberry"], json!("3.1.2"));
    assert_eq!(output.document["__platform"], json!("blackberry"));
    assert_eq!(
        output.warnings.count_of(WarningKind::UnmatchedOverlayRecord),
        1
    );
}

#[test]
fn run_exports_addon_skeleton() {
    let dir = TempDir::new().expect("temp dir");
    widget_docs(dir.path());
    let docs = dir.path().join("docs");

    let output = run(&args(&["-f", "addon", "-p", "android", docs.to_str().unwrap()]))
        .expect("run");

    assert_eq!(output.document["__copyList"], json!([]));
    assert_eq!(
        output.document["Core.Widget"]["platforms"],
        json!(["android"])
    );
}

#[test]
fn addon_format_requires_platform() {
    let dir = TempDir::new().expect("temp dir");
    widget_docs(dir.path());
    let docs = dir.path().join("docs");

    let err = run(&args(&["-f", "addon", docs.to_str().unwrap()])).expect_err("no platform");
    assert!(err.to_string().contains("requires --platform"));
}

#[test]
fn unknown_platform_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    widget_docs(dir.path());
    let docs = dir.path().join("docs");

    let err = run(&args(&["-p", "tizen", docs.to_str().unwrap()])).expect_err("bad platform");
    assert!(err.to_string().contains("unknown platform"));
}

#[test]
fn inheritance_cycle_fails_the_run() {
    let dir = TempDir::new().expect("temp dir");
    write_json(
        dir.path(),
        "docs/cycle.json",
        &json!({"A": {"extends": "B"}, "B": {"extends": "A"}}),
    );
    let docs = dir.path().join("docs");

    let err = run(&args(&[docs.to_str().unwrap()])).expect_err("cycle");
    assert!(format!("{err:#}").contains("circular inheritance: A -> B -> A"));
}

#[test]
fn empty_input_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let err = run(&args(&[dir.path().to_str().unwrap()])).expect_err("nothing to do");
    assert!(err.to_string().contains("no class declarations"));
}

#[test]
fn writes_pretty_json_to_file() {
    let dir = TempDir::new().expect("temp dir");
    let out = dir.path().join("out.json");

    write_output(&json!({"a": 1}), Some(&out)).expect("write");

    let text = std::fs::read_to_string(&out).expect("read back");
    assert_eq!(text, "{\n  \"a\": 1\n}\n");
}
