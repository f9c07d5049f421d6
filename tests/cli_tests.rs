//! End-to-end tests for the `transcode` binary

use assert_cmd::Command;
use predicates::prelude::*;

fn transcode() -> Command {
    let mut cmd = Command::cargo_bin("transcode").unwrap();
    for (var, _) in transcode_pipe::config_initialization::ENV_MAPPINGS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_mime_prints_one_line_per_path() {
    transcode()
        .args(["mime", "movie.mkv", "song.flac", "unknown.xyz"])
        .assert()
        .success()
        .stdout("video/x-matroska\naudio/flac\napplication/octet-stream\n");
}

#[test]
fn test_mime_requires_a_path() {
    transcode().arg("mime").assert().failure();
}

#[test]
fn test_dry_run_prints_webm_command() {
    transcode()
        .args([
            "stream", "--profile", "webm", "--input", "movie.mkv", "--start", "90", "--length", "0",
            "--threads", "2", "--dry-run",
        ])
        .assert()
        .success()
        .stdout("avconv -threads 2 -async 1 -ss 0:01:30 -i movie.mkv -f webm pipe:\n");
}

#[test]
fn test_dry_run_web_keeps_length() {
    transcode()
        .args(["stream", "-p", "web", "-i", "movie.mkv", "-s", "1:00", "-l", "30", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ffmpeg -ss 0:01:00 -i movie.mkv"))
        .stdout(predicate::str::contains("-t 0:00:30 -f mp4 pipe:"));
}

#[test]
fn test_dry_run_honours_env_encoder() {
    transcode()
        .env("TRANSCODE_PRIMARY_ENCODER", "/opt/ffmpeg/bin/ffmpeg")
        .args(["stream", "-p", "chromecast", "-i", "a.mkv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/opt/ffmpeg/bin/ffmpeg -ss 0:00:00 -i a.mkv"));
}

#[test]
fn test_config_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("transcode.toml");
    std::fs::write(&config, "threads = 3\n\n[encoders]\nsecondary = \"/usr/bin/avconv\"\n").unwrap();

    transcode()
        .arg("--config")
        .arg(&config)
        .args(["stream", "-p", "webm", "-i", "a.mkv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/usr/bin/avconv -threads 3 "));
}

#[test]
fn test_unknown_profile_fails() {
    transcode()
        .args(["stream", "--profile", "flv", "--input", "a.mkv", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("flv"));
}

#[test]
fn test_negative_start_fails() {
    transcode()
        .args(["stream", "-p", "web", "-i", "a.mkv", "-s", "-5", "--dry-run"])
        .assert()
        .failure();
}

#[cfg(unix)]
#[test]
fn test_exec_streams_command_output() {
    transcode()
        .args(["exec", "--command", "printf 'hello world'"])
        .assert()
        .success()
        .stdout("hello world");
}

#[cfg(unix)]
#[test]
fn test_exec_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.bin");

    transcode()
        .args(["exec", "-c", "printf data"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(std::fs::read(&out).unwrap(), b"data");
}

#[test]
fn test_exec_unclosed_quote_fails() {
    transcode()
        .args(["exec", "--command", "ffmpeg -i \"movie.mkv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quote"));
}
