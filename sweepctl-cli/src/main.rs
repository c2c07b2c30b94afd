//! sweepctl - exploratory sweep driver for a job-running CLI
//!
//! Runs every (command, flag) combination from a fixed catalog against an
//! external CLI and prints each command line, the tool's raw output, and
//! its exit status for a human to read through:
//! - `run` executes the sweep, stage by stage
//! - `plan` lists the command lines without executing anything
//! - `extract-id` applies the job-id scrape to saved `jobs list` output
//! - `config` manages ~/.sweepctl/config.toml

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use sweepctl_core::SweepConfig;

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "sweepctl",
    author,
    version,
    about = "Sweep a job-running CLI with every command and flag combination",
    long_about = "Runs a fixed catalog of commands (many deliberately malformed) against an \
                  external job-running CLI, crossed with a set of global flags, and prints the \
                  raw output and exit status of every invocation for manual review."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Config file (default: ~/.sweepctl/config.toml, optional)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Invocation prefix of the CLI under test (overrides config)
    #[arg(long, value_name = "CMD", env = "SWEEPCTL_BASE_CLI", global = true)]
    pub base_cli: Option<String>,

    /// License server host:port used by `license install` commands
    #[arg(long, value_name = "ADDR", env = "SWEEPCTL_LICENSE_SERVER", global = true)]
    pub license_server: Option<String>,
}

impl GlobalArgs {
    /// Load the config file and apply command-line overrides
    pub fn load_config(&self) -> Result<SweepConfig> {
        SweepConfig::load(self.config.as_deref())
            .context("Failed to load sweepctl config")?
            .with_overrides(self.base_cli.clone(), self.license_server.clone())
            .context("Invalid command-line override")
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the sweep against the CLI under test
    Run(commands::run::RunArgs),
    /// List the command lines a sweep would run, without running them
    Plan(commands::plan::PlanArgs),
    /// Extract a job id from saved `jobs list` output
    ExtractId(commands::extract::ExtractArgs),
    /// Manage sweepctl configuration (init, show, path, validate)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.global.debug,
    })
    .ok();

    match cli.command {
        Commands::Run(args) => commands::run_sweep(args, &cli.global)?,
        Commands::Plan(args) => commands::run_plan(args, &cli.global)?,
        Commands::ExtractId(args) => commands::run_extract(args, &cli.global)?,
        Commands::Config(args) => config::run_config(args, &cli.global)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
