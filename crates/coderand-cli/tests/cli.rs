//! End-to-end tests for the `coderand` binary.

use assert_cmd::Command;
use predicates::prelude::*;

fn coderand() -> Command {
    Command::cargo_bin("coderand").unwrap()
}

#[test]
fn convert_prints_bits() {
    coderand()
        .args(["convert", "ab"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ab\t0100001001"));
}

#[test]
fn convert_rejects_ambiguous_symbol() {
    coderand()
        .args(["convert", "A1B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid character '1' at position 1"));
}

#[test]
fn decode_round_trips() {
    coderand()
        .args(["decode", "0000000000"])
        .assert()
        .success()
        .stdout("22\n");
    coderand()
        .args(["decode", "0101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a multiple of 5"));
}

#[test]
fn analyze_csv_keeps_every_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("codes.csv");
    std::fs::write(&input, "ABCDEF2345,2222222222\nBAD0,7KQ3XN9PWD\n").unwrap();

    let output = coderand()
        .args(["analyze", "--quiet", "-f", "csv", "-p", "2"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[1].starts_with("ABCDEF2345,50,"));
    assert!(lines[2].starts_with("2222222222,50,"));
    assert!(lines[3].starts_with("BAD0,"));
    assert!(lines[4].starts_with("7KQ3XN9PWD,50,"));
}

#[test]
fn analyze_json_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("codes.csv");
    let out = dir.path().join("out.json");
    std::fs::write(&input, "ABCDEF2345\n").unwrap();

    coderand()
        .args(["analyze", "--quiet", "-f", "json", "-o"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value[0]["code"], "ABCDEF2345");
    assert_eq!(value[0]["bit_length"], 50);
    assert_eq!(value[0]["overall_passed"], true);
}

#[test]
fn analyze_summary_and_limit() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("codes.csv");
    std::fs::write(&input, "ABCDEF2345,2222222222,7KQ3XN9PWD\n").unwrap();

    coderand()
        .args(["analyze", "--quiet", "-l", "2"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total codes analyzed:       2"));
}

#[test]
fn analyze_rejects_bad_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("codes.csv");
    std::fs::write(&input, "ABC\n").unwrap();

    coderand()
        .args(["analyze", "--quiet", "--alpha", "2"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("alpha must be in (0, 1)"));
}

#[test]
fn generate_then_analyze() {
    let dir = tempfile::tempdir().unwrap();
    let codes = dir.path().join("gen.csv");

    coderand()
        .args(["generate", "-n", "12", "-l", "8", "--per-line", "4", "--seed", "9", "-o"])
        .arg(&codes)
        .assert()
        .success();

    let text = std::fs::read_to_string(&codes).unwrap();
    assert_eq!(text.lines().count(), 3);

    coderand()
        .args(["analyze", "--quiet", "-f", "summary"])
        .arg(&codes)
        .assert()
        .success()
        .stdout(predicate::str::contains("Conversion failures:        0"));
}
