use super::helpers::{build_registry, print_diagnostics};
use crate::catalog::Catalog;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use std::path::Path;

pub fn execute(root: &Path, config: &Config, format: OutputFormat) -> Result<()> {
    let registry = build_registry(root, config)?;
    let catalog = Catalog::from_registry(&registry);

    let rendered = match format {
        OutputFormat::Text => catalog.render_list(),
        OutputFormat::Markdown => catalog.render_markdown(),
        OutputFormat::Json => {
            let mut json = catalog.render_json()?;
            json.push('\n');
            json
        }
    };
    print!("{}", rendered);

    print_diagnostics(&catalog);

    let errors = catalog.errors.len();
    let warnings = catalog.warnings.len();
    if errors > 0 || (config.schema.deny_warnings && warnings > 0) {
        return Err(CatalogError::ValidationFailed { errors, warnings });
    }

    // Stdout carries only the rendered catalog, so the summary joins the
    // diagnostics on stderr.
    eprintln!(
        "✓ {} agent(s) valid ({} warning(s))",
        catalog.agents.len(),
        warnings
    );
    Ok(())
}
