use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sweepctl_core::SweepConfig;

use crate::GlobalArgs;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with the default settings
    Init(InitArgs),
    /// Print the effective config (file plus overrides) as TOML
    Show,
    /// Show config file path
    Path,
    /// Check that the config loads and its values are usable
    Validate,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args, global),
        ConfigCommands::Show => run_show(global),
        ConfigCommands::Path => run_path(global),
        ConfigCommands::Validate => run_validate(global),
    }
}

fn target_path(global: &GlobalArgs) -> std::path::PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(SweepConfig::config_path)
}

fn run_init(args: InitArgs, global: &GlobalArgs) -> Result<()> {
    let config_path = target_path(global);

    // Check if config already exists
    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    // Seed from defaults plus any --base-cli / --license-server given now
    let config = SweepConfig::default()
        .with_overrides(global.base_cli.clone(), global.license_server.clone())?;

    config
        .save_to(&config_path)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", config_path);
    println!("  2. Point base_cli at the CLI under test");
    println!("  3. Run: sweepctl plan");

    Ok(())
}

fn run_show(global: &GlobalArgs) -> Result<()> {
    let config = global.load_config()?;

    let toml_str = config
        .to_toml_string()
        .context("Failed to serialize config to TOML")?;

    println!("{}", toml_str);

    Ok(())
}

fn run_path(global: &GlobalArgs) -> Result<()> {
    let config_path = target_path(global);
    println!("{}", config_path.display());

    if !config_path.exists() {
        println!("\n⚠️  Config file does not exist yet (built-in defaults apply)");
        println!("   Run: sweepctl config init");
    }

    Ok(())
}

fn run_validate(global: &GlobalArgs) -> Result<()> {
    println!("🔍 Validating configuration...");

    let config = global.load_config()?;

    println!("  ✓ base_cli: {}", config.base_cli);
    println!("  ✓ license_server: {}", config.license_server);
    println!("  ✓ job_list_line: {}", config.job_list_line);

    if let Some(dir) = &config.working_dir {
        println!("  ✓ working_dir: {}", dir.display());
    }

    println!("\n✅ Configuration is valid");

    Ok(())
}
