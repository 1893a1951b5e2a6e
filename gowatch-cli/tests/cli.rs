use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (rel, content) in files {
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn gowatch(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gowatch"))
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

const MAIN_GO: &str = "package app\n\nfunc Handler() {\n\tfmt.Println(Add(1, 2))\n}\n";
const MATH_GO: &str = "package app\n\nfunc Add(a, b int) int { return a + b }\n\nfunc sub() {}\n";

#[test]
fn prints_watch_list_json() {
    let dir = project(&[
        ("main.go", MAIN_GO),
        ("math.go", MATH_GO),
        ("math_test.go", "package app\n\nfunc Add() {}\n"),
    ]);

    let out = gowatch(dir.path(), &["main.go"]);
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        r#"{"packageName":"app","functionName":"Handler","watch":["main.go","math.go"]}"#
    );
}

#[test]
fn entry_given_with_directory() {
    let dir = project(&[("api/main.go", MAIN_GO), ("api/lib/math.go", MATH_GO)]);

    let out = gowatch(dir.path(), &["api/main.go"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["packageName"], "app");
    assert_eq!(json["watch"], serde_json::json!(["main.go", "lib/math.go"]));
}

#[test]
fn no_exported_function_prints_nothing() {
    let dir = project(&[("main.go", "package main\n\nfunc main() {}\n")]);

    let out = gowatch(dir.path(), &["main.go"]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn wrong_argument_count_is_usage_error() {
    let dir = project(&[("main.go", MAIN_GO)]);

    let none = gowatch(dir.path(), &[]);
    assert!(!none.status.success());
    assert!(none.stdout.is_empty());
    assert!(String::from_utf8_lossy(&none.stderr).contains("Usage"));

    let two = gowatch(dir.path(), &["main.go", "math.go"]);
    assert!(!two.status.success());
    assert!(two.stdout.is_empty());
}

#[test]
fn entry_name_starting_with_hyphen() {
    let dir = project(&[("-main.go", MAIN_GO), ("math.go", MATH_GO)]);

    let out = gowatch(dir.path(), &["-main.go"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        r#"{"packageName":"app","functionName":"Handler","watch":["-main.go","math.go"]}"#
    );
}

#[test]
fn missing_entry_fails() {
    let dir = project(&[("math.go", MATH_GO)]);

    let out = gowatch(dir.path(), &["main.go"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("main.go"));
}

#[test]
fn malformed_sibling_fails_without_output() {
    let dir = project(&[
        ("main.go", MAIN_GO),
        ("bad.go", "package app\n\nfunc Bad( {\n"),
    ]);

    let out = gowatch(dir.path(), &["main.go"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("bad.go"));
}
