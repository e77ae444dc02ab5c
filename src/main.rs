#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use agent_catalog::cli::{Cli, Commands, ConfigCommands};
use agent_catalog::commands;
use agent_catalog::config::Config;
use agent_catalog::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose)?;

    // Every command needs a discovery root; config is loaded relative to it
    let (root, deny_warnings) = match &cli.command {
        Commands::Validate {
            root,
            deny_warnings,
            ..
        } => (root.root.clone(), *deny_warnings),
        Commands::List { root } => (root.root.clone(), false),
        Commands::Config {
            command: ConfigCommands::Show { root },
        } => (root.root.clone(), false),
    };

    let config = Config::load(&root, cli.config.as_deref())?
        .with_cli_overrides(cli.verbose, deny_warnings);

    match &cli.command {
        Commands::Validate { format, .. } => {
            commands::validate::execute(&root, &config, *format)?;
        }
        Commands::List { .. } => {
            commands::list::execute(&root, &config)?;
        }
        Commands::Config { command } => {
            commands::config::execute(command, &config)?;
        }
    }

    Ok(())
}
