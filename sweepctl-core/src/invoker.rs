//! One (command, flag) invocation of the external CLI

use crate::error::Result;
use crate::runner::{ExitReport, Runner};
use std::io::Write;

/// Build the shell line for one invocation
///
/// Joined with single spaces and nothing trimmed: when there is no job id
/// the line carries an empty token (`prefix command  flag`), and an empty
/// flag leaves a trailing space. The external CLI is exercised with exactly
/// what the line says.
pub fn command_line(prefix: &str, command: &str, job_id: Option<&str>, flag: &str) -> String {
    [prefix, command, job_id.unwrap_or(""), flag].join(" ")
}

/// Prints each line, runs it, and reports the exit status
pub struct Invoker<'a, R: Runner, W: Write> {
    prefix: &'a str,
    runner: &'a mut R,
    out: &'a mut W,
}

impl<'a, R: Runner, W: Write> Invoker<'a, R, W> {
    pub fn new(prefix: &'a str, runner: &'a mut R, out: &'a mut W) -> Self {
        Self {
            prefix,
            runner,
            out,
        }
    }

    /// Run one combination
    ///
    /// A non-zero exit is the observation, not a failure. Only a transcript
    /// write error or a shell that will not start comes back as `Err`.
    pub fn invoke(
        &mut self,
        command: &str,
        flag: &str,
        job_id: Option<&str>,
    ) -> Result<ExitReport> {
        let line = command_line(self.prefix, command, job_id, flag);
        writeln!(self.out, "\n{}", line)?;
        self.out.flush()?;

        let report = self.runner.run(&line)?;

        writeln!(self.out, "exit status {}", report)?;
        self.out.flush()?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedRunner;

    #[test]
    fn test_command_line_without_job_keeps_empty_token() {
        assert_eq!(
            command_line("node te.js", "user list", None, "-C"),
            "node te.js user list  -C"
        );
    }

    #[test]
    fn test_command_line_with_job() {
        assert_eq!(
            command_line("node te.js", "jobs status", Some("job-42"), "-c admin.config"),
            "node te.js jobs status job-42 -c admin.config"
        );
    }

    #[test]
    fn test_command_line_empty_job_same_as_none() {
        assert_eq!(
            command_line("te", "jobs status", Some(""), "-c"),
            command_line("te", "jobs status", None, "-c")
        );
    }

    #[test]
    fn test_invoke_prints_line_and_status() {
        let mut runner = ScriptedRunner::new().with_exit_codes([0]);
        let mut out = Vec::new();

        let report = Invoker::new("te", &mut runner, &mut out)
            .invoke("auditlog", "-C", None)
            .unwrap();

        assert!(report.success());
        assert_eq!(String::from_utf8(out).unwrap(), "\nte auditlog  -C\nexit status 0\n");
        assert_eq!(runner.ran, vec!["te auditlog  -C"]);
    }

    #[test]
    fn test_invoke_never_fails_on_nonzero_exit() {
        let mut runner = ScriptedRunner::new().with_exit_codes([1, 2]);
        let mut out = Vec::new();

        {
            let mut invoker = Invoker::new("te", &mut runner, &mut out);
            assert_eq!(invoker.invoke("user add", "-c", None).unwrap(), ExitReport::code(1));
            assert_eq!(invoker.invoke("user delete", "-c", None).unwrap(), ExitReport::code(2));
        }

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("exit status 1\n"));
        assert!(text.contains("exit status 2\n"));
    }

    #[test]
    fn test_invoke_reports_signal() {
        let mut runner = ScriptedRunner::new().with_reports([ExitReport::signalled()]);
        let mut out = Vec::new();

        Invoker::new("te", &mut runner, &mut out)
            .invoke("jobs cancel", "-C", Some("job-1"))
            .unwrap();

        assert!(String::from_utf8(out).unwrap().ends_with("exit status signal\n"));
    }
}
