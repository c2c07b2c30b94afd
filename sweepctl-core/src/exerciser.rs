//! Drives the external CLI through every stage
//!
//! Strictly sequential: each child finishes before the next line is built.
//! The transcript (command lines, status lines) goes to `out`; the child's
//! own output goes straight to the console in between.

use crate::catalog::{JobMode, Stage, StageName};
use crate::combos::{combinations, try_run_all_combinations};
use crate::config::SweepConfig;
use crate::error::Result;
use crate::invoker::{command_line, Invoker};
use crate::jobs::start_job;
use crate::runner::Runner;
use serde::Serialize;
use std::io::Write;
use std::time::Instant;
use tracing::{info, info_span};

/// One line the exerciser would run, for `plan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedInvocation {
    pub stage: StageName,
    pub command: String,
    pub flag: String,
    /// Placeholder such as `<job:slow.xml>` when a job id will be spliced in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    pub line: String,
}

/// List every invocation of `stages` without running anything
pub fn plan(config: &SweepConfig, stages: &[Stage]) -> Vec<PlannedInvocation> {
    let mut planned = Vec::new();

    for stage in stages {
        let job = match &stage.job {
            JobMode::None => None,
            JobMode::Shared(project) | JobMode::PerInvocation(project) => {
                Some(format!("<job:{}>", project))
            }
        };

        for (command, flag) in combinations(&stage.commands, &stage.flags) {
            planned.push(PlannedInvocation {
                stage: stage.name,
                command: command.to_string(),
                flag: flag.to_string(),
                line: command_line(&config.base_cli, command, job.as_deref(), flag),
                job: job.clone(),
            });
        }
    }

    planned
}

/// Runs stages against the external CLI
pub struct Exerciser<R: Runner, W: Write> {
    config: SweepConfig,
    runner: R,
    out: W,
}

impl<R: Runner, W: Write> Exerciser<R, W> {
    pub fn new(config: SweepConfig, runner: R, out: W) -> Self {
        Self {
            config,
            runner,
            out,
        }
    }

    /// Give back the runner and sink (tests inspect them)
    pub fn into_parts(self) -> (R, W) {
        (self.runner, self.out)
    }

    /// Run every stage in order, returning how many combinations ran
    pub fn run(&mut self, stages: &[Stage]) -> Result<usize> {
        let started = Instant::now();
        let mut total = 0;

        for stage in stages {
            total += self.run_stage(stage)?;
        }

        info!(
            stages = stages.len(),
            invocations = total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "sweep finished"
        );
        Ok(total)
    }

    /// Run one stage according to its job mode
    pub fn run_stage(&mut self, stage: &Stage) -> Result<usize> {
        let span = info_span!("stage", stage = %stage.name);
        let _guard = span.enter();
        info!(combinations = stage.combination_count(), "stage starting");

        let Self {
            config,
            runner,
            out,
        } = self;
        let config: &SweepConfig = config;
        let mut count = 0;

        match &stage.job {
            JobMode::None => {
                let mut invoker = Invoker::new(&config.base_cli, runner, out);
                try_run_all_combinations(
                    &stage.commands,
                    &stage.flags,
                    |command, flag| -> Result<()> {
                        invoker.invoke(command, flag, None)?;
                        count += 1;
                        Ok(())
                    },
                )?;
            }
            JobMode::Shared(project) => {
                let job_id = start_job(&mut *runner, config, project)?;
                let mut invoker = Invoker::new(&config.base_cli, runner, out);
                try_run_all_combinations(
                    &stage.commands,
                    &stage.flags,
                    |command, flag| -> Result<()> {
                        invoker.invoke(command, flag, Some(&job_id))?;
                        count += 1;
                        Ok(())
                    },
                )?;
            }
            JobMode::PerInvocation(project) => {
                try_run_all_combinations(
                    &stage.commands,
                    &stage.flags,
                    |command, flag| -> Result<()> {
                        let job_id = start_job(&mut *runner, config, project)?;
                        Invoker::new(&config.base_cli, &mut *runner, &mut *out).invoke(
                            command,
                            flag,
                            Some(&job_id),
                        )?;
                        count += 1;
                        Ok(())
                    },
                )?;
            }
        }

        info!(invocations = count, "stage finished");
        Ok(count)
    }
}
