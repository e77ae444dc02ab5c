use crate::agents::{Registry, RegistryBuilder, Schema};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::discovery;
use crate::error::Result;
use std::path::Path;

/// Discover, read and validate every agent definition under `root`.
///
/// Only a missing root is returned as an error. Per-file problems,
/// including entries the directory walk could not reach, end up in the
/// registry.
pub fn build_registry(root: &Path, config: &Config) -> Result<Registry> {
    let schema = Schema::from_config(config);
    let found = discovery::discover(root, &config.discovery)?;

    let mut builder = RegistryBuilder::new(&schema);
    for (path, contents) in discovery::read_all(found) {
        match contents {
            Ok(text) => builder.add_document(&path, &text),
            Err(e) => builder.add_unreadable(&path, e.to_string()),
        }
    }

    let registry = builder.finish();
    tracing::info!(
        root = %root.display(),
        agents = registry.len(),
        errors = registry.errors.len(),
        warnings = registry.warnings.len(),
        "registry built"
    );
    Ok(registry)
}

/// Print warnings then errors to stderr, one per line.
pub fn print_diagnostics(catalog: &Catalog) {
    for warning in &catalog.warnings {
        eprintln!("warning: {}", warning);
    }
    for error in &catalog.errors {
        eprintln!("error: {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_build_registry_from_directory() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join("a.md"),
            "---\nname: market-research\ndescription: Analyzes markets\n---\n",
        )
        .unwrap();
        fs::write(temp.path().join("b.md"), "").unwrap();
        fs::write(temp.path().join("c.md"), [0xff, 0xfe]).unwrap();

        let registry = build_registry(temp.path(), &Config::default()).unwrap();
        assert_eq!(registry.list_available(), vec!["market-research"]);
        assert_eq!(registry.errors.len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_build_registry_survives_dangling_link() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join("good.md"),
            "---\nname: market-research\ndescription: Analyzes markets\n---\n",
        )
        .unwrap();
        std::os::unix::fs::symlink(temp.path().join("missing.md"), temp.path().join("dangling.md"))
            .unwrap();

        let mut config = Config::default();
        config.discovery.follow_links = true;
        let registry = build_registry(temp.path(), &config).unwrap();

        assert_eq!(registry.list_available(), vec!["market-research"]);
        assert_eq!(registry.errors.len(), 1);
        assert_eq!(registry.errors[0].path(), temp.path().join("dangling.md"));
        assert!(matches!(
            registry.errors[0].kind,
            crate::agents::DiagnosticKind::Unreadable(_)
        ));
    }

    #[test]
    fn test_build_registry_applies_extra_tools() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(
            temp.path().join("a.md"),
            "---\nname: a\ndescription: b\ntools: Figma\n---\n",
        )
        .unwrap();

        let registry = build_registry(temp.path(), &Config::default()).unwrap();
        assert_eq!(registry.warnings.len(), 1);

        let mut config = Config::default();
        config.schema.extra_tools = vec!["Figma".to_string()];
        let registry = build_registry(temp.path(), &config).unwrap();
        assert!(registry.warnings.is_empty());
    }
}
