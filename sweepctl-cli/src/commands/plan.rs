//! `sweepctl plan`: list command lines without running them

use anyhow::Result;
use clap::{Parser, ValueEnum};
use sweepctl_core::{plan, select_stages, StageName};

use crate::GlobalArgs;

#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// Stage to list (repeatable; default all)
    #[arg(long = "stage", value_name = "NAME")]
    pub stages: Vec<StageName>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: PlanFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Text,
    Json,
}

pub fn run_plan(args: PlanArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    let stages = select_stages(&config, &args.stages);
    let planned = plan(&config, &stages);

    match args.format {
        PlanFormat::Json => {
            let output = serde_json::json!({
                "base_cli": config.base_cli,
                "total": planned.len(),
                "invocations": planned,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        PlanFormat::Text => {
            for stage in &stages {
                println!("# {} ({} invocations)", stage.name, stage.combination_count());
                for invocation in planned.iter().filter(|p| p.stage == stage.name) {
                    println!("{}", invocation.line);
                }
                println!();
            }
            println!("{} invocations in total", planned.len());
        }
    }

    Ok(())
}
