// rimpub: RimWorld mod publisher
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::ProcessError;
use std::path::Path;
use tokio_util::sync::CancellationToken;

async fn run(builder: ProcessBuilder) -> anyhow::Result<ProcessOutput> {
    builder.run_with_cancellation(CancellationToken::new()).await
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_echo_forwarded_to_log() {
    let output = run(ProcessBuilder::new("echo").arg("hello").forward_to_log())
        .await
        .expect("echo should succeed");

    assert!(output.success());
    assert_eq!(output.exit_code(), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_exit_code_allowed() {
    let builder = ProcessBuilder::new("sh")
        .args(["-c", "exit 42"])
        .flag(ProcessFlags::ALLOW_FAILURE);
    let output = run(builder).await.expect("process should complete");

    assert_eq!(output.exit_code(), 42);
    assert!(!output.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_exit_code_rejected() {
    let err = run(ProcessBuilder::new("sh").args(["-c", "exit 3"]))
        .await
        .unwrap_err();

    let process_err = err.downcast_ref::<ProcessError>().expect("typed error");
    assert!(matches!(process_err, ProcessError::NonZeroExit { code: 3, .. }));
}

#[tokio::test]
async fn test_process_spawn_failure() {
    let err = run(ProcessBuilder::new("/definitely/not/a/real/program"))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::SpawnFailed { .. })
    ));
}

#[tokio::test]
async fn test_process_precancelled() {
    let token = CancellationToken::new();
    token.cancel();

    let output = ProcessBuilder::new("/definitely/not/a/real/program")
        .run_with_cancellation(token)
        .await
        .expect("cancelled before spawn is not an error");
    assert!(output.is_interrupted());
    assert_eq!(output.exit_code(), -1);
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cancelled_while_running() {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        cancel.cancel();
    });

    let output = ProcessBuilder::new("sleep")
        .arg("30")
        .run_with_cancellation(token)
        .await
        .expect("interrupted run is not an error");
    assert!(output.is_interrupted());
    assert!(!output.success());
}

#[cfg(unix)]
#[tokio::test]
async fn test_process_cwd() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("marker.txt"), "").unwrap();

    let builder = ProcessBuilder::new("sh")
        .args(["-c", "test -f marker.txt"])
        .cwd(temp.path())
        .inherit_stdio()
        .flag(ProcessFlags::ALLOW_FAILURE);
    let output = run(builder).await.unwrap();
    assert_eq!(output.exit_code(), 0);
}

#[test]
fn test_from_command_line_splits_arguments() {
    let builder =
        ProcessBuilder::from_command_line("./build.sh  --release   -v", Path::new("/mods/MyMod"))
            .unwrap();
    assert_eq!(builder.program(), Path::new("/mods/MyMod/./build.sh"));
    assert_eq!(builder.args_slice(), ["--release", "-v"]);
    assert_eq!(
        builder.working_dir().map(|p| p.as_path()),
        Some(Path::new("/mods/MyMod"))
    );
}

#[test]
fn test_from_command_line_empty() {
    let err = ProcessBuilder::from_command_line("   ", Path::new(".")).unwrap_err();
    assert!(matches!(err, ProcessError::EmptyCommand));
}

#[test]
fn test_from_command_line_unknown_program() {
    let err = ProcessBuilder::from_command_line("nonexistent_program_12345 build", Path::new("."))
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"executable not found: 'nonexistent_program_12345' (not in PATH)");
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("/usr/bin/msbuild").args(["My Mod.sln", "-v"]);
    insta::assert_snapshot!(builder.command_line(), @r#"/usr/bin/msbuild "My Mod.sln" -v"#);
}

#[cfg(unix)]
#[test]
fn test_executable_lookup() {
    let builder = ProcessBuilder::which("sh").expect("sh should be in PATH");
    assert!(builder.program().exists());
    // Second lookup is served from the cache.
    assert_eq!(ProcessBuilder::find("sh").as_ref(), Some(builder.program()));

    assert!(ProcessBuilder::which("nonexistent_program_12345").is_err());
    assert!(ProcessBuilder::find("nonexistent_program_12345").is_none());
}
