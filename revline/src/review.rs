//! External reviewer plumbing for revline.
//!
//! The reviewer is a user-configured shell command, not a baked-in API
//! client: the selected file's content is written to its stdin, the path
//! and instruction arrive in `REVLINE_FILE` / `REVLINE_PROMPT`, and stdout
//! is taken verbatim as the review prose. The app makes no assumption
//! about the shape of that prose; extraction downstream tolerates
//! anything.
//!
//! Each request runs as one spawned tokio task delivering exactly one
//! `AppEvent::Review`. Failures (no command configured, spawn error,
//! non-zero exit) travel the same path as successes and surface as a
//! message in the review panel; they never tear down the app.

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::ReviewerConfig;
use crate::event::AppEvent;

/// Instruction sent to the reviewer when the config does not override it.
pub const DEFAULT_PROMPT: &str =
    "Please review this code and provide detailed feedback with line numbers.";

/// Result of one reviewer invocation, tagged with the file it was for.
///
/// The path tag lets the event loop discard a response that arrives after
/// the user has already selected a different file.
#[derive(Debug)]
pub struct ReviewOutcome {
    /// Workspace-relative path the review was requested for.
    pub path: String,
    /// The review prose on success, a display-ready reason on failure.
    pub result: Result<String, String>,
}

/// Spawns a task that runs the reviewer and posts one `AppEvent::Review`.
///
/// The task owns copies of everything it needs; the caller keeps nothing
/// to join or cancel. A response for a stale file selection is discarded
/// by the receiver, not here.
pub fn spawn_review_task(
    tx: UnboundedSender<AppEvent>,
    reviewer: ReviewerConfig,
    path: String,
    content: String,
) {
    tokio::spawn(async move {
        let result = run_reviewer(&reviewer, &path, &content)
            .await
            .map_err(|e| e.to_string());
        let _ = tx.send(AppEvent::Review(Box::new(ReviewOutcome { path, result })));
    });
}

/// Runs the configured reviewer command to completion.
///
/// # Errors
///
/// Returns `Err` when no command is configured, the process cannot be
/// spawned, stdin cannot be written, or the command exits non-zero.
async fn run_reviewer(
    reviewer: &ReviewerConfig,
    path: &str,
    content: &str,
) -> std::io::Result<String> {
    let Some(command) = reviewer.command.as_deref() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "no reviewer command configured (set [reviewer] command in config.toml)",
        ));
    };

    let mut child = Command::new("sh")
        .arg("-c")
        .arg(command)
        .env("REVLINE_FILE", path)
        .env("REVLINE_PROMPT", &reviewer.prompt)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;

    // Write the file content and close stdin so the command sees EOF;
    // holding the handle open would deadlock reviewers that read to end.
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(content.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;
    if !output.status.success() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("reviewer command failed with {}", output.status),
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_command_is_a_soft_error() {
        let reviewer = ReviewerConfig {
            command: None,
            prompt: DEFAULT_PROMPT.to_owned(),
        };
        let err = run_reviewer(&reviewer, "src/main.rs", "fn main() {}")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no reviewer command"));
    }

    #[tokio::test]
    async fn command_receives_content_and_env() {
        let reviewer = ReviewerConfig {
            command: Some("printf 'file=%s\\n' \"$REVLINE_FILE\"; cat".to_owned()),
            prompt: "p".to_owned(),
        };
        let out = run_reviewer(&reviewer, "src/lib.rs", "Line 1: body")
            .await
            .unwrap();
        assert!(out.contains("file=src/lib.rs"));
        assert!(out.contains("Line 1: body"));
    }

    #[tokio::test]
    async fn failing_command_reports_status() {
        let reviewer = ReviewerConfig {
            command: Some("exit 3".to_owned()),
            prompt: String::new(),
        };
        let err = run_reviewer(&reviewer, "x", "").await.unwrap_err();
        assert!(err.to_string().contains("failed"));
    }
}
