use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn nbgrade() -> Command {
    let mut cmd = Command::cargo_bin("nbgrade").expect("binary exists");
    cmd.env_remove("TEST_NAME")
        .env_remove("NOTEBOOK_PATH")
        .env("NBGRADE_LOG", "off");
    cmd
}

fn report(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("stdout is a JSON report")
}

#[test]
fn help_displays_usage() {
    nbgrade()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn missing_notebook_still_reports_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let out = nbgrade()
        .arg(dir.path().join("absent.ipynb"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = report(&out);
    let test = &value["tests"][0];
    assert_eq!(value["tests"].as_array().map(Vec::len), Some(1));
    assert_eq!(test["name"], "Heat Sink Multi-Objective Optimization");
    assert_eq!(test["score"], 0.0);
    assert_eq!(test["max_score"], 10);
    assert!(test["output"]
        .as_str()
        .unwrap()
        .starts_with("Error reading notebook file"));
}

#[test]
fn grades_captured_output() {
    let dir = tempfile::tempdir().unwrap();
    let captured = dir.path().join("stdout.txt");
    fs::write(&captured, "Ideal point: z = [0.01, 0.3]\nIdeal point: z = [0.0075, 0.2]\n").unwrap();

    let out = nbgrade()
        .args(["--name", "Regrade"])
        .arg("--from-output")
        .arg(&captured)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value = report(&out);
    assert_eq!(value["tests"][0]["name"], "Regrade");
    assert_eq!(value["tests"][0]["score"], 5.56);
}

#[test]
fn extract_only_prints_program() {
    let dir = tempfile::tempdir().unwrap();
    let nb = dir.path().join("hw.ipynb");
    let doc = serde_json::json!({
        "cells": [
            {"cell_type": "markdown", "metadata": {}, "source": ["notes"]},
            {"cell_type": "code", "metadata": {}, "outputs": [], "execution_count": null,
             "source": ["x = 1\n", "    # YOUR CODE HERE"]}
        ],
        "metadata": {}, "nbformat": 4, "nbformat_minor": 5
    });
    fs::write(&nb, doc.to_string()).unwrap();

    nbgrade()
        .arg(&nb)
        .arg("--extract-only")
        .assert()
        .success()
        .stdout("x = 1\n    1\n");
}
