//! Starting jobs on the external CLI and scraping their ids back
//!
//! The external CLI prints `jobs list` as a table with the newest job on a
//! fixed line. Its second-to-last column is the job id; counting from the
//! end means the number of columns in front of it does not matter.

use crate::config::SweepConfig;
use crate::error::Result;
use crate::runner::Runner;
use tracing::{info, warn};

/// Pull the job id out of `jobs list` output
///
/// `line` is 1-based. Returns an empty string when the line is missing or
/// has fewer than two whitespace-separated tokens; callers pass that along
/// unchanged.
pub fn extract_job_id(listing: &str, line: usize) -> String {
    let Some(row) = line.checked_sub(1).and_then(|idx| listing.lines().nth(idx)) else {
        return String::new();
    };

    let tokens: Vec<&str> = row.split_whitespace().collect();
    match tokens.len().checked_sub(2) {
        Some(idx) => tokens[idx].to_string(),
        None => String::new(),
    }
}

/// `<base> run project <project> -c <admin_config>`
pub fn start_line(config: &SweepConfig, project: &str) -> String {
    let admin = format!("-c {}", config.admin_config);
    [config.base_cli.as_str(), "run project", project, admin.as_str()].join(" ")
}

/// `<base> jobs list -c <admin_config> -c <admin_config>`
///
/// The config flag is passed twice; the external CLI has to cope with a
/// repeated option on this path too.
pub fn list_line(config: &SweepConfig) -> String {
    format!(
        "{} jobs list -c {} -c {}",
        config.base_cli, config.admin_config, config.admin_config
    )
}

/// Start a run of `project` and return the id of the newest job
///
/// The start command runs to completion with its output on the console,
/// then the job list is captured and scraped. A listing that does not have
/// the expected shape yields an empty id, not an error.
pub fn start_job<R: Runner>(runner: &mut R, config: &SweepConfig, project: &str) -> Result<String> {
    let report = runner.run(&start_line(config, project))?;
    info!(project, status = %report, "started job");

    let listing = runner.capture(&list_line(config))?;
    let job_id = extract_job_id(&listing, config.job_list_line);

    if job_id.is_empty() {
        warn!(
            project,
            line = config.job_list_line,
            "could not find a job id in the job listing, continuing with an empty id"
        );
    } else {
        info!(project, job_id = %job_id, "scraped job id");
    }

    Ok(job_id)
}
