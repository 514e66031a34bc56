//! Test driver for command-line integration tests.
//!
//! Spawns a binary with:
//! - stdin: the slave side of a PTY with a chosen window size, or /dev/null
//! - stdout: a pipe, captured for assertions
//! - stderr: a pipe, captured for assertions

use nix::pty::{openpty, Winsize};
use std::ffi::OsStr;
use std::process::{Command, Stdio};

/// Rows reported by the PTY; only the column count matters to callers.
const PTY_ROWS: u16 = 24;

/// A command line waiting to be run.
pub struct TestSession {
    command: Command,
    columns: Option<u16>,
}

impl TestSession {
    /// Prepare `binary` with the given arguments.
    pub fn new(binary: &str, args: &[&str]) -> TestSession {
        let mut command = Command::new(binary);
        command.args(args);
        TestSession {
            command,
            columns: None,
        }
    }

    /// Attach stdin to a terminal that is `columns` wide.
    pub fn columns(mut self, columns: u16) -> TestSession {
        self.columns = Some(columns);
        self
    }

    /// Append one argument that need not be valid UTF-8.
    pub fn arg_os(mut self, arg: &OsStr) -> TestSession {
        self.command.arg(arg);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> TestSession {
        self.command.env(key, value);
        self
    }

    /// Run to completion and capture the output.
    pub fn run(mut self) -> std::io::Result<SessionOutput> {
        // The master must stay open until the child exits, or the slave
        // side reports a hangup.
        let _master = match self.columns {
            Some(ws_col) => {
                let size = Winsize {
                    ws_row: PTY_ROWS,
                    ws_col,
                    ws_xpixel: 0,
                    ws_ypixel: 0,
                };
                let pty = openpty(Some(&size), None).map_err(std::io::Error::from)?;
                self.command.stdin(Stdio::from(pty.slave));
                Some(pty.master)
            }
            None => {
                self.command.stdin(Stdio::null());
                None
            }
        };

        let output = self.command.output()?;
        Ok(SessionOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Run and assert the exit code.
    pub fn wait_exit(self, expected_code: i32) -> SessionOutput {
        let output = self.run().expect("failed to run child");
        assert_eq!(
            output.code, expected_code,
            "expected exit code {expected_code}, got {}\nstdout:\n{}\nstderr:\n{}",
            output.code, output.stdout, output.stderr
        );
        output
    }
}

/// Output captured from a completed session.
pub struct SessionOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}
