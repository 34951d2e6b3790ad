//! Tests for the sectionkit command-line tool.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const PAGE: &str = concat!(
    "<!DOCTYPE html><html><head><title>t</title></head><body>",
    r#"<div class="section" data-type="imgText" data-img="/a.jpg" data-caption="A"><p>Hi</p></div>"#,
    "</body></html>",
);

const PARTIAL: &str = r#"<div class="img-stub" data-img="/b.jpg" data-size="lrg"></div>"#;

fn sectionkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sectionkit"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run sectionkit")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    write_bytes(dir, name, contents.as_bytes())
}

fn write_bytes(dir: &Path, name: &str, contents: &[u8]) -> String {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn test_single_input_prints_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "index.html", PAGE);

    let output = sectionkit(&["-q", &input]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("<!DOCTYPE html>"));
    assert!(stdout.contains(r#"<div class="img-text-div-wrapper">"#));
    assert!(!stdout.contains("data-type"));
    assert!(output.stderr.is_empty());
}

#[test]
fn test_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "index.html", PAGE);
    let out = dir.path().join("dist").join("index.html");

    let output = sectionkit(&[&input, "-o", out.to_str().unwrap()]);
    assert!(output.status.success());

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains(r#"<div class="div-wrapper">"#));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("1 section(s)"));
}

#[test]
fn test_several_inputs_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.html", PAGE);
    let b = write(dir.path(), "b.html", PAGE);
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();

    let output = sectionkit(&["-q", &a, &b, "-o", out.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(out.join("a.html").exists());
    assert!(out.join("b.html").exists());
}

#[test]
fn test_same_file_names_are_refused() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a/index.html", PAGE);
    let b = write(dir.path(), "b/index.html", PAGE);
    let out = dir.path().join("out");

    let output = sectionkit(&["-q", &a, &b, "-o", out.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error:"));
    assert!(!out.join("index.html").exists());
}

#[test]
fn test_trailing_separator_means_directory() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "index.html", PAGE);
    let out = format!("{}{}", dir.path().join("dist").display(), std::path::MAIN_SEPARATOR);

    let output = sectionkit(&["-q", &input, "-o", &out]);
    assert!(output.status.success());

    let html = fs::read_to_string(dir.path().join("dist").join("index.html")).unwrap();
    assert!(html.contains(r#"<div class="div-wrapper">"#));
}

#[test]
fn test_legacy_charset_is_rewritten_to_utf8() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_bytes(
        dir.path(),
        "latin1.html",
        b"<html><head><meta charset=\"ISO-8859-1\"></head><body><p>caf\xe9</p></body></html>",
    );
    let out = dir.path().join("out.html");

    let output = sectionkit(&["-q", &input, "-o", out.to_str().unwrap()]);
    assert!(output.status.success());

    let html = String::from_utf8(fs::read(&out).unwrap()).expect("output is UTF-8");
    assert!(html.contains("caf\u{e9}"));
    assert!(html.contains(r#"<meta charset="utf-8">"#));
    assert!(!html.contains("ISO-8859-1"));
}

#[test]
fn test_several_inputs_need_destination() {
    let dir = tempfile::tempdir().unwrap();
    let a = write(dir.path(), "a.html", PAGE);
    let b = write(dir.path(), "b.html", PAGE);

    let output = sectionkit(&[&a, &b]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error:"));
}

#[test]
fn test_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "page.html", PAGE);

    let output = sectionkit(&["--in-place", "-q", &input]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let html = fs::read_to_string(&input).unwrap();
    assert!(html.contains("img-text-div-text"));
    assert!(!html.contains(r#"class="section""#));
}

#[test]
fn test_fragment_output_has_no_document_shell() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "partial.html", PARTIAL);

    let output = sectionkit(&["--fragment", "-q", &input]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(r#"<div class="lrg-img-text-div-img">"#));
    assert!(!stdout.contains("<body>"));
}

#[test]
fn test_check_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let raw = write(dir.path(), "raw.html", PAGE);

    let output = sectionkit(&["--check", &raw]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("1 unexpanded stub(s)"));

    assert!(sectionkit(&["--in-place", "-q", &raw]).status.success());
    assert!(sectionkit(&["--check", "-q", &raw]).status.success());
}

#[test]
fn test_json_reports() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "index.html", PAGE);

    let output = sectionkit(&["--json", &input]);
    assert!(output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    let line = stderr.lines().next().unwrap();
    let report: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(report["sections"], 1);
    assert_eq!(report["inline_images"], 0);
    assert!(report["file"].as_str().unwrap().ends_with("index.html"));
}

#[test]
fn test_check_conflicts_with_output() {
    let output = sectionkit(&["--check", "-o", "x.html", "y.html"]);
    assert!(!output.status.success());
}
