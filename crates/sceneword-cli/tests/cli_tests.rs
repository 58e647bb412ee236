//! Integration tests for the command-line tools.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn postprocess() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sceneword-postprocess"));
    cmd.env_remove("SCENEWORD_LEXICON").env_remove("RUST_LOG");
    cmd
}

fn lexicon() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sceneword-lexicon"));
    cmd.env_remove("SCENEWORD_LEXICON").env_remove("RUST_LOG");
    cmd
}

const EXIT_SIGN: &str = r#"{
    "size": { "width": 200, "height": 100 },
    "lines": [{
        "region": { "x": 20, "y": 20, "width": 100, "height": 40 },
        "text": "EXIT",
        "words": [
            { "rect": { "x": 15, "y": 15, "width": 60, "height": 30 },
              "word": "EXlT", "confidence": 77.0 },
            { "rect": { "x": 17, "y": 16, "width": 58, "height": 28 },
              "word": "EXIT", "confidence": 70.0 },
            { "rect": { "x": 90, "y": 15, "width": 10, "height": 10 },
              "word": "lll", "confidence": 95.0 }
        ]
    }]
}"#;

fn write_input(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, EXIT_SIGN).unwrap();
    path
}

#[test]
fn single_input_goes_to_stdout() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "img_1.json");

    postprocess()
        .arg(&input)
        .assert()
        .success()
        .stdout("20,20,80,20,80,50,20,50,EXlT\n");
}

#[test]
fn lexicon_corrects_words() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "img_1.json");
    let voc = dir.path().join("voc.txt");
    fs::write(&voc, "exit entrance\n").unwrap();

    postprocess()
        .arg(&input)
        .arg("--lexicon")
        .arg(&voc)
        .assert()
        .success()
        .stdout("20,20,80,20,80,50,20,50,EXIT\n");
}

#[test]
fn lexicon_from_environment() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "img_1.json");
    let voc = dir.path().join("voc.txt");
    fs::write(&voc, "EXIT\n").unwrap();

    postprocess()
        .env("SCENEWORD_LEXICON", &voc)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::ends_with(",EXIT\n"));
}

#[test]
fn batch_writes_result_files() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let a = write_input(dir.path(), "img_1.json");
    let b = write_input(dir.path(), "img_2.jpg.json");

    postprocess()
        .arg(&a)
        .arg(&b)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    for name in ["res_img_1.txt", "res_img_2.txt"] {
        let content = fs::read_to_string(out.join(name)).unwrap();
        assert_eq!(content, "20,20,80,20,80,50,20,50,EXlT\n");
    }
}

#[test]
fn batch_without_output_dir_is_rejected() {
    let dir = TempDir::new().unwrap();
    let a = write_input(dir.path(), "img_1.json");
    let b = write_input(dir.path(), "img_2.json");

    postprocess()
        .arg(&a)
        .arg(&b)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--output-dir"));
}

#[test]
fn failed_inputs_are_reported() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let good = write_input(dir.path(), "img_1.json");
    let bad = dir.path().join("img_2.json");
    fs::write(&bad, "{ not json").unwrap();

    postprocess()
        .arg(&good)
        .arg(&bad)
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 of 2 inputs failed"));

    assert!(out.join("res_img_1.txt").exists());
    assert!(!out.join("res_img_2.txt").exists());
}

#[test]
fn stricter_confidence_override() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "img_1.json");

    postprocess()
        .arg(&input)
        .args(["--min-confidence", "80"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn lexicon_tool_reports_outcomes() {
    let dir = TempDir::new().unwrap();
    let voc = dir.path().join("voc.txt");
    fs::write(&voc, "HELLO WORLD\n").unwrap();

    lexicon()
        .arg("--lexicon")
        .arg(&voc)
        .args(["hellc", "world", "xyzpq"])
        .assert()
        .success()
        .stdout(
            "hellc -> HELLO (distance 1)\nWORLD (exact)\nxyzpq: discarded (best distance 5)\n",
        );
}

#[test]
fn lexicon_tool_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let voc = dir.path().join("voc.txt");
    fs::write(&voc, "HELLO\n").unwrap();

    lexicon()
        .arg("--lexicon")
        .arg(&voc)
        .write_stdin("HELLO\n\nHALLO\n")
        .assert()
        .success()
        .stdout("HELLO (exact)\nHALLO -> HELLO (distance 1)\n");
}
