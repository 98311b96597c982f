//! Integration tests for the transcript-dl CLI
//!
//! These tests drive the built binary end to end. They only use inputs that
//! never reach the network: missing links, dry runs, and links without a
//! recognizable video ID.

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

/// Shared scratch directory, removed by the cleanup hook below
fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join("transcript-dl-integration");
    std::fs::create_dir_all(&dir).expect("Failed to create scratch directory");
    dir
}

/// Run the CLI with the given arguments and capture its output
fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_transcript-dl"))
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to run transcript-dl")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_no_links_fails() {
    let dir = tempdir().unwrap();
    let output = run_cli(&["-d", dir.path().to_str().unwrap()]);

    assert!(!output.status.success(), "Expected failure without links");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Please enter YouTube video links"), "stderr: {stderr}");
    assert!(!dir.path().join("youtube_transcripts.txt").exists());
}

#[test]
fn test_blank_input_file_counts_as_no_links() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("links.txt");
    std::fs::write(&input, "\n   \n\n").unwrap();

    let output = run_cli(&["-i", input.to_str().unwrap(), "-d", dir.path().to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Please enter YouTube video links"));
}

#[test]
fn test_missing_input_file_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.txt");

    let output = run_cli(&["-i", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Failed to read links from"));
}

#[test]
fn test_dry_run_mode() {
    let dir = scratch_dir();
    let output = run_cli(&[
        "--dry-run",
        "-d",
        dir.to_str().unwrap(),
        "-o",
        "dry-run",
        "https://www.youtube.com/watch?v=AAA&t=1",
        "not a link",
        "youtu.be/BBB",
    ]);

    assert!(output.status.success(), "Dry run should succeed: {}", stderr_of(&output));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("[DRY RUN] 3 link(s)"));
    assert!(stderr.contains("-> AAA"));
    assert!(stderr.contains("-> BBB"));
    assert!(stderr.contains("not a link -> skipped"));
    assert!(!dir.join("dry-run.txt").exists(), "Dry run must not create the output file");
}

#[test]
fn test_only_malformed_links_writes_empty_file() {
    let dir = scratch_dir();
    let output = run_cli(&["-d", dir.to_str().unwrap(), "-o", "malformed", "bad-link", "also bad"]);

    assert!(output.status.success(), "Batch should succeed: {}", stderr_of(&output));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Error processing bad-link"));
    assert!(stderr.contains("Transcripts downloaded to:"));

    let written = std::fs::read_to_string(dir.join("malformed.txt")).unwrap();
    assert_eq!(written, "");
}

#[test]
fn test_no_clobber_keeps_existing_file() {
    let dir = tempdir().unwrap();
    let existing = dir.path().join("keep.txt");
    std::fs::write(&existing, "existing content").unwrap();

    let output = run_cli(&["--no-clobber", "-d", dir.path().to_str().unwrap(), "-o", "keep", "bad-link"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("file already exists"));
    assert_eq!(std::fs::read_to_string(&existing).unwrap(), "existing content");
}

#[test]
fn test_unwritable_destination_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");

    let output = run_cli(&["-d", missing.to_str().unwrap(), "bad-link"]);

    assert!(!output.status.success());
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Failed to save transcripts"), "stderr: {stderr}");
    assert!(!stderr.contains("Transcripts downloaded to:"));
}

/// Cleanup function to remove any test files
#[cfg(test)]
mod cleanup {
    use std::fs;

    #[ctor::dtor]
    fn cleanup() {
        let _ = fs::remove_dir_all(std::env::temp_dir().join("transcript-dl-integration"));
    }
}
