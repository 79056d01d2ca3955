//! External command execution.
//!
//! Every stage of the pipeline shells out through [`execute`]: the child is
//! spawned with piped stdio, its streams are drained on reader threads, and
//! the pipeline [`Deadline`] is enforced by polling the child and killing it
//! once the budget is gone.

use crate::error::{RelayError, Result};
use crate::shell::Deadline;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Stdout and stderr concatenated, for stages that echo everything.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.clone();
        out.push_str(&self.stderr);
        out
    }
}

/// Execute `program` with `args`, capturing stdout and stderr separately.
///
/// A non-zero exit is reported in the returned [`CommandResult`], not as an
/// error; callers that require success use [`execute_checked`]. The only
/// error paths are spawn failure and the deadline elapsing.
pub fn execute(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    deadline: &Deadline,
) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("executing {} {:?} in {:?}", program, args, cwd);

    let mut child = cmd.spawn().map_err(|source| RelayError::CommandSpawn {
        program: program.to_string(),
        source,
    })?;

    // Drain both pipes off-thread so a chatty child can't block on a full pipe
    // while we wait for it.
    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();
    let stdout_handle = thread::spawn(move || {
        let mut buf = String::new();
        if let Some(pipe) = stdout_pipe.as_mut() {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    });
    let stderr_handle = thread::spawn(move || {
        let mut buf = String::new();
        if let Some(pipe) = stderr_pipe.as_mut() {
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    });

    let status = loop {
        match child.try_wait()? {
            Some(status) => break status,
            None => {
                if deadline.expired() {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(RelayError::CommandTimedOut {
                        program: program.to_string(),
                        timeout: deadline.total(),
                    });
                }
                thread::sleep(POLL_INTERVAL.min(deadline.remaining()));
            }
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    tracing::debug!(
        "{} exited with {:?} after {:?}, {} stdout bytes",
        program,
        status.code(),
        duration,
        stdout.len()
    );

    Ok(CommandResult {
        exit_code: status.code(),
        stdout,
        stderr,
        duration,
        success: status.success(),
    })
}

/// Execute a command, echo its combined output, and require a zero exit.
///
/// Non-zero exits become [`RelayError::CommandFailed`] wrapping the program
/// and arguments. Used by the preparation and build stages, where every
/// invocation's output belongs in the run log.
pub fn execute_checked(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    deadline: &Deadline,
) -> Result<CommandResult> {
    let result = execute(program, args, cwd, deadline)?;
    print!("{}", result.combined());
    if !result.success {
        return Err(RelayError::CommandFailed {
            program: program.to_string(),
            args: args.to_vec(),
            code: result.exit_code,
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn execute_captures_stdout() {
        let result = execute("echo", &args(&["hello"]), None, &Deadline::default()).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_reports_nonzero_exit_without_error() {
        let result = execute("sh", &args(&["-c", "exit 3"]), None, &Deadline::default()).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_captures_stderr_separately() {
        let result = execute(
            "sh",
            &args(&["-c", "echo out; echo err >&2"]),
            None,
            &Deadline::default(),
        )
        .unwrap();
        assert!(result.stdout.contains("out"));
        assert!(result.stderr.contains("err"));
        assert!(!result.stdout.contains("err"));
    }

    #[test]
    fn execute_respects_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = execute("pwd", &[], Some(temp.path()), &Deadline::default()).unwrap();
        assert!(result.success);
        let reported = result.stdout.trim();
        let canonical = temp.path().canonicalize().unwrap();
        assert_eq!(std::path::Path::new(reported), canonical);
    }

    #[test]
    fn execute_spawn_failure_names_program() {
        let err = execute(
            "definitely-not-a-real-binary",
            &[],
            None,
            &Deadline::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("definitely-not-a-real-binary"));
    }

    #[test]
    fn execute_kills_child_on_expired_deadline() {
        let deadline = Deadline::after(Duration::from_millis(200));
        let start = Instant::now();
        let err = execute("sleep", &args(&["30"]), None, &deadline).unwrap_err();
        assert!(matches!(err, RelayError::CommandTimedOut { .. }));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn execute_checked_errors_on_failure() {
        let err =
            execute_checked("sh", &args(&["-c", "exit 1"]), None, &Deadline::default())
                .unwrap_err();
        match err {
            RelayError::CommandFailed {
                program,
                args,
                code,
            } => {
                assert_eq!(program, "sh");
                assert_eq!(args[0], "-c");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn combined_concatenates_both_streams() {
        let result = CommandResult {
            exit_code: Some(0),
            stdout: "a\n".into(),
            stderr: "b\n".into(),
            duration: Duration::ZERO,
            success: true,
        };
        assert_eq!(result.combined(), "a\nb\n");
    }
}
