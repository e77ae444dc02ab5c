use crate::cli::ConfigCommands;
use crate::config::{Config, CONFIG_FILE_NAME};
use crate::error::Result;

pub fn execute(command: &ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Show { root } => show(&root.root, config),
    }
}

fn show(root: &std::path::Path, config: &Config) -> Result<()> {
    println!("# Effective configuration for {}", root.display());
    println!(
        "# (CLI > env > --config > {} > ~/{} > defaults)\n",
        CONFIG_FILE_NAME, CONFIG_FILE_NAME
    );
    print!("{}", config.resolved().to_toml()?);
    Ok(())
}
