//! Scripted [`Runner`] for unit tests

use crate::error::Result;
use crate::runner::{ExitReport, Runner};
use std::collections::VecDeque;

/// Records every line and replays queued results
///
/// When a queue runs dry, `run` reports exit 0 and `capture` returns "".
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    pub ran: Vec<String>,
    pub captured: Vec<String>,
    history: Vec<String>,
    reports: VecDeque<ExitReport>,
    outputs: VecDeque<String>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_codes(self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.with_reports(codes.into_iter().map(ExitReport::code))
    }

    pub fn with_reports(mut self, reports: impl IntoIterator<Item = ExitReport>) -> Self {
        self.reports.extend(reports);
        self
    }

    pub fn with_outputs<S: Into<String>>(mut self, outputs: impl IntoIterator<Item = S>) -> Self {
        self.outputs.extend(outputs.into_iter().map(Into::into));
        self
    }

    /// Every line in execution order, run and captured interleaved
    pub fn all_lines(&self) -> Vec<&str> {
        self.history.iter().map(String::as_str).collect()
    }
}

impl Runner for ScriptedRunner {
    fn run(&mut self, line: &str) -> Result<ExitReport> {
        self.ran.push(line.to_string());
        self.history.push(line.to_string());
        Ok(self.reports.pop_front().unwrap_or(ExitReport::code(0)))
    }

    fn capture(&mut self, line: &str) -> Result<String> {
        self.captured.push(line.to_string());
        self.history.push(line.to_string());
        Ok(self.outputs.pop_front().unwrap_or_default())
    }
}
