//! External program execution.
//!
//! Every call to `op` or `kubectl` goes through [`CommandRunner`], which is
//! passed into the clients that need it. Tests substitute a recording runner.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::trace;

use crate::error::RunnerError;

/// Runs an external program and captures its output.
pub trait CommandRunner {
    /// Run `program` with `args`, writing `stdin` to its input channel when given.
    ///
    /// Returns captured stdout on success. A non-zero exit becomes
    /// [`RunnerError::Exited`] carrying the captured stderr.
    ///
    /// # Errors
    ///
    /// Returns `RunnerError` if the program cannot be started or fails.
    fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> Result<Vec<u8>, RunnerError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> Result<Vec<u8>, RunnerError> {
        (**self).run(program, args, stdin)
    }
}

/// Runs programs as child processes of the current process.
///
/// Blocks until the child exits; no timeout is applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Check that `program` resolves to an executable.
    fn check_installed(program: &str) -> Result<(), RunnerError> {
        which::which(program).map_err(|_| RunnerError::NotInstalled {
            program: program.to_string(),
        })?;
        Ok(())
    }
}

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        program: &str,
        args: &[String],
        stdin: Option<&[u8]>,
    ) -> Result<Vec<u8>, RunnerError> {
        Self::check_installed(program)?;

        // Arguments are logged, payloads are not: they may carry plaintext.
        trace!(program, args = ?args, stdin_len = stdin.map(<[u8]>::len), "running command");

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|source| RunnerError::Spawn {
            program: program.to_string(),
            source,
        })?;

        if let (Some(payload), Some(mut pipe)) = (stdin, child.stdin.take()) {
            match pipe.write_all(payload) {
                Ok(()) => {}
                // The child stopped reading; its exit status and stderr say why.
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {
                    trace!(program, "child closed stdin early");
                }
                Err(source) => {
                    return Err(RunnerError::Spawn {
                        program: program.to_string(),
                        source,
                    });
                }
            }
            // Dropping the pipe closes it so the child sees EOF.
        }

        let output = child
            .wait_with_output()
            .map_err(|source| RunnerError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(RunnerError::Exited {
                program: program.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        trace!(program, stdout_len = output.stdout.len(), "command finished");
        Ok(output.stdout)
    }
}
