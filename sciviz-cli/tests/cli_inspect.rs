use std::fs;

use assert_cmd::Command;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use predicates::prelude::*;

fn sciviz() -> Command {
    let mut cmd = Command::cargo_bin("sciviz").expect("sciviz binary");
    cmd.env_remove("GEMINI_API_KEY").env_remove("API_KEY");
    cmd
}

fn write_payload(dir: &tempfile::TempDir, samples: usize) -> String {
    let bytes: Vec<u8> = (0..samples)
        .flat_map(|i| ((i % 200) as i16 - 100).to_le_bytes())
        .collect();
    let path = dir.path().join("speech.b64");
    fs::write(&path, STANDARD.encode(bytes)).expect("write payload");
    path.display().to_string()
}

#[test]
fn inspect_reports_speech_format() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_payload(&dir, 36_000);

    sciviz()
        .args(["inspect", &path])
        .assert()
        .success()
        .stdout(predicate::str::contains("sample_rate=24000"))
        .stdout(predicate::str::contains("channels=1"))
        .stdout(predicate::str::contains("frames=36000"))
        .stdout(predicate::str::contains("duration=1.500s"));
}

#[test]
fn inspect_honours_format_overrides() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_payload(&dir, 16_000);

    sciviz()
        .args(["inspect", &path, "--sample-rate", "8000", "--channels", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("frames=8000"))
        .stdout(predicate::str::contains("duration=1.000s"));
}

#[test]
fn inspect_rejects_corrupt_payload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.b64");
    fs::write(&path, "%%% not base64 %%%").expect("write payload");

    sciviz()
        .args(["inspect", &path.display().to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid base64"));
}

#[test]
fn explore_without_api_key_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    sciviz()
        .current_dir(dir.path())
        .args(["black hole", "--no-playback"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY"));
}

#[test]
fn no_arguments_prints_help() {
    sciviz()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
