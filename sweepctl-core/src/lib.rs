pub mod catalog;
pub mod combos;
pub mod config;
pub mod error;
pub mod exerciser;
pub mod invoker;
pub mod jobs;
pub mod runner;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::{select_stages, stages, JobMode, Stage, StageName};
pub use combos::{combinations, run_all_combinations};
pub use config::SweepConfig;
pub use error::{Result, SweepError};
pub use exerciser::{plan, Exerciser, PlannedInvocation};
pub use invoker::{command_line, Invoker};
pub use jobs::{extract_job_id, start_job};
pub use runner::{ExitReport, Runner, ShellRunner};
