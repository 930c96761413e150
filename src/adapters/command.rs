use crate::utils::error::{Result, SyncError};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs a command with captured output, returning stdout. Non-zero exit
/// is an error carrying the captured stderr.
pub async fn run_checked(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program).args(args).output().await?;

    if !output.status.success() {
        return Err(SyncError::CommandFailed {
            program: program.to_string(),
            status: output.status.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Like [`run_checked`], but writes `input` to the child's stdin first.
pub async fn run_checked_with_stdin(program: &str, args: &[&str], input: &str) -> Result<String> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes()).await?;
    }

    let output = child.wait_with_output().await?;

    if !output.status.success() {
        return Err(SyncError::CommandFailed {
            program: program.to_string(),
            status: output.status.to_string(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Runs a command with inherited stdio, so its output lands on the
/// entrypoint's own streams. Non-zero exit is an error.
pub async fn run_streamed(program: &str, args: &[&str]) -> Result<()> {
    let status = Command::new(program).args(args).status().await?;

    if !status.success() {
        return Err(SyncError::CommandFailed {
            program: program.to_string(),
            status: status.to_string(),
            code: status.code(),
            stderr: String::new(),
        });
    }

    Ok(())
}

/// Runs a command line through the shell with inherited stdio.
pub async fn run_shell(command_line: &str) -> Result<()> {
    run_streamed("sh", &["-c", command_line]).await
}

/// Replaces the current process image with `argv` (execvp semantics).
/// Only returns on failure.
#[cfg(unix)]
pub fn exec(argv: &[String]) -> SyncError {
    use std::os::unix::process::CommandExt;

    let Some((program, args)) = argv.split_first() else {
        return SyncError::ConfigError {
            message: "Cannot exec an empty command".to_string(),
        };
    };

    let err = std::process::Command::new(program).args(args).exec();
    SyncError::IoError(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_checked_captures_stdout() {
        let out = run_checked("echo", &["hello"]).await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_run_checked_reports_failure() {
        let err = run_checked("sh", &["-c", "echo oops >&2; exit 3"])
            .await
            .unwrap_err();

        match err {
            SyncError::CommandFailed {
                program,
                code,
                stderr,
                ..
            } => {
                assert_eq!(program, "sh");
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_run_checked_with_stdin() {
        let out = run_checked_with_stdin("cat", &[], "piped input")
            .await
            .unwrap();
        assert_eq!(out, "piped input");
    }

    #[tokio::test]
    async fn test_run_shell_fail_fast() {
        assert!(run_shell("true").await.is_ok());
        assert!(run_shell("false").await.is_err());
    }

    #[tokio::test]
    async fn test_run_shell_surfaces_child_exit_code() {
        let err = run_shell("exit 101").await.unwrap_err();

        assert!(matches!(
            err,
            SyncError::CommandFailed { code: Some(101), .. }
        ));
        assert_eq!(err.exit_code(), 101);
    }

    #[cfg(unix)]
    #[test]
    fn test_exec_empty_command_is_config_error() {
        assert!(matches!(exec(&[]), SyncError::ConfigError { .. }));
    }
}
