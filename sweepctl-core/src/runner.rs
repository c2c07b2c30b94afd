//! Process execution seam
//!
//! Everything the exerciser does to the outside world goes through
//! [`Runner`]: either run a line with the console inherited, or run it and
//! hand back its stdout. [`ShellRunner`] is the real thing; tests swap in a
//! scripted runner.

use crate::config::SweepConfig;
use crate::error::{Result, SweepError};
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, instrument};

/// How a child process finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitReport {
    /// Exit code, `None` if the child was killed by a signal
    pub code: Option<i32>,
}

impl ExitReport {
    pub fn code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signalled() -> Self {
        Self { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for ExitReport {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ExitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "signal"),
        }
    }
}

/// Executes shell command lines
pub trait Runner {
    /// Run `line`, child output goes straight to the console
    fn run(&mut self, line: &str) -> Result<ExitReport>;

    /// Run `line` and return its stdout; stderr stays on the console
    fn capture(&mut self, line: &str) -> Result<String>;
}

/// Runs lines through `sh -c` (or `cmd /C` on Windows)
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
    working_dir: Option<PathBuf>,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            working_dir: None,
        }
    }

    pub fn from_config(config: &SweepConfig) -> Self {
        Self {
            shell: config.shell.clone(),
            working_dir: config.working_dir.clone(),
        }
    }

    fn command(&self, line: &str) -> Command {
        let mut cmd = Command::new(&self.shell);
        cmd.arg(shell_switch(&self.shell)).arg(line);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

/// `cmd` wants `/C`, everything else is assumed POSIX-ish
fn shell_switch(shell: &str) -> &'static str {
    let name = shell
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(shell)
        .to_ascii_lowercase();
    if name == "cmd" || name == "cmd.exe" {
        "/C"
    } else {
        "-c"
    }
}

impl Runner for ShellRunner {
    #[instrument(skip(self), level = "debug")]
    fn run(&mut self, line: &str) -> Result<ExitReport> {
        let status = self
            .command(line)
            .stdin(Stdio::inherit())
            .status()
            .map_err(|e| SweepError::spawn(line, e))?;
        debug!(code = ?status.code(), "child exited");
        Ok(status.into())
    }

    #[instrument(skip(self), level = "debug")]
    fn capture(&mut self, line: &str) -> Result<String> {
        let output = self
            .command(line)
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| SweepError::spawn(line, e))?;
        debug!(
            code = ?output.status.code(),
            bytes = output.stdout.len(),
            "captured child output"
        );
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
