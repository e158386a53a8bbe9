use std::fs;
use std::path::Path;

use assert_cmd::Command;

const COUNTER_UNIT: &str = r#"{
  "name": "m.py",
  "module": {"body": [
    {"class": "Assign", "lineno": 1,
     "targets": [{"class": "Name", "id": "c", "ctx": {"class": "Store"}}],
     "value": {"class": "Constant", "value": 0}},
    {"class": "AugAssign", "lineno": 2,
     "target": {"class": "Name", "id": "c", "ctx": {"class": "Store"}},
     "op": {"class": "Add"},
     "value": {"class": "Name", "id": "i"}}
  ]},
  "symtable": {"name": "top", "kind": "module", "locals": ["c"]}
}"#;

const WITH_UNIT: &str = r#"{
  "module": {"body": [{"class": "With", "lineno": 3, "items": [], "body": []}]},
  "symtable": {"name": "top", "kind": "module"}
}"#;

fn py2jl() -> Command {
    Command::cargo_bin("py2jl").unwrap()
}

fn write_unit(dir: &Path, file: &str, text: &str) -> String {
    let path = dir.join(file);
    fs::write(&path, text).unwrap();
    path.display().to_string()
}

#[test]
fn build_prints_to_stdout_with_prelude() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), "m.json", COUNTER_UNIT);

    let out = py2jl()
        .args(["build", input.as_str(), "--no-line-markers"])
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "using Py2JlRuntime\n\nc = jpy_literal(0)\nc = jpy_iadd(c, i)\njpy_none;\n"
    );
}

#[test]
fn build_writes_output_file_with_line_markers() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), "m.json", COUNTER_UNIT);
    let output = dir.path().join("out.jl");

    py2jl()
        .args(["build", input.as_str(), "--prelude", ""])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("# m.py, line 1\nc = jpy_literal(0)\n"));
    assert!(text.ends_with("jpy_none;\n"));
}

#[test]
fn glob_batch_writes_next_to_each_input() {
    let dir = tempfile::tempdir().unwrap();
    write_unit(dir.path(), "one.json", COUNTER_UNIT);
    write_unit(dir.path(), "two.json", COUNTER_UNIT);
    let pattern = format!("{}/*.json", dir.path().display());

    py2jl().args(["build", pattern.as_str()]).assert().success();
    assert!(dir.path().join("one.jl").exists());
    assert!(dir.path().join("two.jl").exists());
}

#[test]
fn output_flag_rejects_multiple_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_unit(dir.path(), "a.json", COUNTER_UNIT);
    let b = write_unit(dir.path(), "b.json", COUNTER_UNIT);

    let out = py2jl()
        .args(["build", a.as_str(), b.as_str(), "-o", "x.jl"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(!dir.path().join("x.jl").exists());
}

#[test]
fn unsupported_construct_fails_with_report() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), "w.json", WITH_UNIT);

    let out = py2jl().args(["build", input.as_str()]).output().unwrap();
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("PY2JL | ERROR | w.json:3:0 | unsupported: with statement"));
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_input_is_reported() {
    let out = py2jl()
        .args(["build", "no_such_unit.json"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot read unit"));
}

#[test]
fn dump_scopes_prints_the_scope_tree() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_unit(dir.path(), "m.json", COUNTER_UNIT);

    let out = py2jl()
        .args(["build", input.as_str(), "--dump", "scopes"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let tree: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(tree["kind"], "module");
    assert_eq!(tree["locals"][0], "c");
}

#[test]
fn intrinsics_as_json() {
    let out = py2jl().args(["intrinsics", "--json"]).output().unwrap();
    assert!(out.status.success());
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&out.stdout).unwrap();
    assert!(rows.iter().any(|r| r["name"] == "jpy_iadd"));
}

#[test]
fn intrinsics_table() {
    let out = py2jl().arg("intrinsics").output().unwrap();
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("Intrinsic"));
    assert!(text.contains("jpy_getiter"));
}
