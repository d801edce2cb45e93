//! Syllabus - course structure scaffolding and navigation.

mod check;
mod cli;
mod config;
mod init;
mod logger;
mod nav;
mod scaffold;
mod structure;
mod utils;
mod watch;

use anyhow::{Result, bail};
use check::check_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::{ReportFormat, SiteConfig, handle};
use init::new_project;
use nav::nav_site;
use scaffold::scaffold_site;
use watch::watch_for_changes_blocking;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    handle::init_config(load_config(cli)?);
    let config = handle::cfg();

    match &cli.command {
        Commands::Init { .. } => new_project(&config),
        Commands::Scaffold { .. } => {
            let report = scaffold_site(&config)?;
            if config.scaffold.report == ReportFormat::Json {
                println!("{}", report.to_json()?);
            }
            if !report.is_success() {
                bail!("scaffold finished with failures: {}", report.summary());
            }
            Ok(())
        }
        Commands::Check { .. } => check_site(&config),
        Commands::Nav { route, json, .. } => nav_site(&config, route, *json),
        Commands::Watch { .. } => watch_for_changes_blocking(),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// The config file is optional for every command except that `init`
/// refuses to run over an existing one.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    if cli.is_init() {
        if config.config_path.exists() {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
    } else {
        config.validate()?;
    }

    Ok(config)
}
