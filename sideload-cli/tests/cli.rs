use predicates::prelude::*;
use serde_json::{json, Value};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
    input: PathBuf,
    spec: PathBuf,
}

fn build_workspace() -> Result<Workspace, Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("books.json");
    let spec = dir.path().join("spec.toml");

    fs::write(
        &input,
        serde_json::to_vec(&json!([
            { "id": 1, "internal": "x", "authors": [{ "aid": 7, "name": "ann" }] },
            { "id": 2, "internal": "y", "authors": [{ "aid": 7, "name": "ann" }, { "aid": 8, "name": "bo" }] }
        ]))?,
    )?;
    fs::write(
        &spec,
        r#"
delete = "internal"

[wrapper]
singular = "book"
plural = "books"

[[sideloads]]
property = "authors"
idAttribute = "aid"
as = "authors"
"#,
    )?;

    Ok(Workspace { dir, input, spec })
}

fn sideload() -> Result<assert_cmd::Command, Box<dyn Error>> {
    Ok(assert_cmd::Command::cargo_bin("sideload")?)
}

#[test]
fn transform_prints_document_to_stdout() -> Result<(), Box<dyn Error>> {
    let ws = build_workspace()?;
    let output = sideload()?
        .args(["transform", ws.input.to_str().unwrap(), "--spec", ws.spec.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let document: Value = serde_json::from_slice(&output)?;
    assert_eq!(
        document,
        json!({
            "books": [{ "id": 1, "authors": [7] }, { "id": 2, "authors": [7, 8] }],
            "authors": [{ "aid": 7, "name": "ann" }, { "aid": 8, "name": "bo" }]
        })
    );
    Ok(())
}

#[test]
fn transform_writes_output_file_and_summary() -> Result<(), Box<dyn Error>> {
    let ws = build_workspace()?;
    let out = ws.dir.path().join("out.json");

    sideload()?
        .args([
            "transform",
            ws.input.to_str().unwrap(),
            "--spec",
            ws.spec.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
            "--pretty",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("authors: 2"));

    let written = fs::read_to_string(&out)?;
    assert!(written.contains("\n  \"books\""));
    Ok(())
}

#[test]
fn transform_reads_stdin() -> Result<(), Box<dyn Error>> {
    let ws = build_workspace()?;
    sideload()?
        .args(["transform", "-", "--spec", ws.spec.to_str().unwrap()])
        .write_stdin(r#"{ "authors": { "aid": 3 } }"#)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""book":{"authors":3}"#));
    Ok(())
}

#[test]
fn transform_rejects_scalar_input() -> Result<(), Box<dyn Error>> {
    let ws = build_workspace()?;
    sideload()?
        .args(["transform", "-", "--spec", ws.spec.to_str().unwrap()])
        .write_stdin("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid target"));
    Ok(())
}

#[test]
fn transform_reports_bad_spec_file() -> Result<(), Box<dyn Error>> {
    let ws = build_workspace()?;
    let bad = ws.dir.path().join("bad.json");
    fs::write(&bad, r#"{ "wrapper": { "singular": "b" }, "sideloads": [{ "property": "x" }] }"#)?;

    sideload()?
        .args(["transform", ws.input.to_str().unwrap(), "--spec", bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.json"));
    Ok(())
}

#[test]
fn get_applies_default_for_falsy_values() -> Result<(), Box<dyn Error>> {
    let input = r#"{ "a": { "zero": 0, "name": "x", "nil": null } }"#;

    sideload()?
        .args(["get", "-", "--path", "a.name"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("\"x\"\n");

    sideload()?
        .args(["get", "-", "--path", "a.zero", "--default", "5"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("5\n");

    sideload()?
        .args(["get", "-", "--path", "a.nil", "--default", "5"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout("null\n");

    sideload()?
        .args(["get", "-", "--path", "a.missing"])
        .write_stdin(input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No value at 'a.missing'"));
    Ok(())
}

#[test]
fn paths_lists_each_visited_leaf() -> Result<(), Box<dyn Error>> {
    let ws = build_workspace()?;
    let output = sideload()?
        .args(["paths", ws.input.to_str().unwrap(), "--path", "authors.name"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let lines: Vec<Value> = String::from_utf8(output)?
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(
        lines,
        vec![
            json!({ "key": "name", "value": "ann" }),
            json!({ "key": "name", "value": "ann" }),
            json!({ "key": "name", "value": "bo" }),
        ]
    );
    Ok(())
}

#[test]
fn malformed_path_fails() -> Result<(), Box<dyn Error>> {
    sideload()?
        .args(["paths", "-", "--path", "a..b"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty segment"));
    Ok(())
}
