use super::helpers::build_registry;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// Print validated agents only. Validation errors do not affect the exit code.
pub fn execute(root: &Path, config: &Config) -> Result<()> {
    let registry = build_registry(root, config)?;
    let catalog = Catalog::from_registry(&registry);

    if catalog.agents.is_empty() {
        eprintln!("No valid agent definitions found in {}", root.display());
        return Ok(());
    }

    print!("{}", catalog.render_list());
    Ok(())
}
