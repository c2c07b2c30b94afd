//! `sweepctl extract-id`: run the job-id scrape on saved output
//!
//! Handy for checking what a sweep would pick up from a given `jobs list`
//! table before pointing it at a live server.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use sweepctl_core::extract_job_id;
use tracing::warn;

use crate::GlobalArgs;

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// File holding `jobs list` output (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// 1-based line holding the job (default: job_list_line from config)
    #[arg(long, value_name = "N")]
    pub line: Option<usize>,
}

pub fn run_extract(args: ExtractArgs, global: &GlobalArgs) -> Result<()> {
    let line = match args.line {
        Some(0) => anyhow::bail!("--line is 1-based and must be at least 1"),
        Some(line) => line,
        None => global.load_config()?.job_list_line,
    };

    let listing = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let job_id = extract_job_id(&listing, line);
    if job_id.is_empty() {
        warn!(line, "no job id found on that line");
    }
    println!("{}", job_id);

    Ok(())
}
