//! Binary-level smoke tests for the CLI.

use assert_cmd::Command;
use predicates::prelude::*;

fn capx() -> Command {
    Command::cargo_bin("capx-cli").unwrap()
}

#[test]
fn generate_produces_caption_package() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("demo.txt");
    std::fs::write(&script, "Speaker 1: Hello there.\nSpeaker 2: Hi back!").unwrap();
    let output_dir = dir.path().join("captions");

    capx()
        .arg("generate")
        .arg("--script")
        .arg(&script)
        .arg("--duration")
        .arg("6.0")
        .arg("--output-dir")
        .arg(&output_dir)
        .arg("--no-asr")
        .arg("--no-silence")
        .assert()
        .success();

    let srt = std::fs::read_to_string(output_dir.join("demo.srt")).unwrap();
    assert!(srt.starts_with("1\n00:00:00,000 --> "));
    assert!(srt.contains("[Speaker 1] Hello there."));
    assert!(srt.contains("[Speaker 2] Hi back!"));

    let vtt = std::fs::read_to_string(output_dir.join("demo.vtt")).unwrap();
    assert!(vtt.starts_with("WEBVTT\n\n"));
    assert!(vtt.contains("<v Speaker 2>Hi back!"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_dir.join("demo.json")).unwrap())
            .unwrap();
    assert_eq!(json["total_segments"], 2);
    assert_eq!(json["total_duration"], 6.0);
}

#[test]
fn generate_requires_duration_or_audio() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("demo.txt");
    std::fs::write(&script, "Speaker 1: Hello.").unwrap();

    capx()
        .arg("generate")
        .arg("--script")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--duration or --audio"));
}

#[test]
fn generate_rejects_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("demo.txt");
    std::fs::write(&script, "Speaker 1: Hello.").unwrap();

    capx()
        .arg("generate")
        .arg("--script")
        .arg(&script)
        .arg("--duration")
        .arg("5")
        .arg("--formats")
        .arg("srt,ass")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown caption format"));
}

#[test]
fn generate_with_speaker_names() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("demo.txt");
    std::fs::write(&script, "Speaker 1: Hello there.").unwrap();
    let output_dir = dir.path().join("captions");

    capx()
        .arg("generate")
        .arg("--script")
        .arg(&script)
        .arg("--duration")
        .arg("4")
        .arg("--output-dir")
        .arg(&output_dir)
        .arg("--speaker")
        .arg("1=Alice")
        .arg("--no-asr")
        .arg("--no-silence")
        .assert()
        .success();

    let transcript = std::fs::read_to_string(output_dir.join("demo.txt")).unwrap();
    assert_eq!(transcript, "[00:00] Alice: Hello there.");
}

#[test]
fn empty_script_succeeds_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("empty.txt");
    std::fs::write(&script, "").unwrap();
    let output_dir = dir.path().join("captions");

    capx()
        .arg("generate")
        .arg("--script")
        .arg(&script)
        .arg("--duration")
        .arg("5")
        .arg("--output-dir")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("no caption units"));
    assert!(!output_dir.exists());
}

#[test]
fn config_list_prints_defaults() {
    capx()
        .arg("config")
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[timing]"))
        .stdout(predicate::str::contains("words_per_minute"));
}

#[test]
fn config_get_single_key() {
    capx()
        .arg("config")
        .arg("--get")
        .arg("script.max_words")
        .assert()
        .success()
        .stdout(predicate::str::contains("15"));
}

#[test]
fn missing_script_file_fails_with_script_error() {
    capx()
        .arg("generate")
        .arg("--script")
        .arg("/no/such/script.txt")
        .arg("--duration")
        .arg("5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Script error"));
}
