//! `sweepctl run`: execute the sweep

use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use sweepctl_core::{select_stages, Exerciser, ShellRunner, StageName};
use tracing::info;

use crate::GlobalArgs;

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Stage to run (repeatable: general, jobs, cancel, diagnostics; default all)
    #[arg(long = "stage", value_name = "NAME")]
    pub stages: Vec<StageName>,
}

pub fn run_sweep(args: RunArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let stages = select_stages(&config, &args.stages);

    info!(
        base_cli = %config.base_cli,
        stages = stages.len(),
        "starting sweep"
    );

    let runner = ShellRunner::from_config(&config);
    let mut exerciser = Exerciser::new(config, runner, io::stdout());
    exerciser
        .run(&stages)
        .context("Sweep aborted before every combination ran")?;

    Ok(())
}
