use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".agent-catalog.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    #[serde(default)]
    pub schema: SchemaConfig,

    #[serde(default)]
    pub lint: LintConfig,

    /// Verbose mode - debug logging on stderr (not stored in config file)
    #[serde(skip)]
    pub verbose: bool,
}

const DEFAULT_EXTENSIONS: &[&str] = &["md"];
const DEFAULT_EXCLUDE: &[&str] = &["README.md", "CLAUDE.md"];

/// `None` means the layer did not set the list, so a later layer can
/// replace it with anything, including the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiscoveryConfig {
    /// File extensions treated as agent definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// File names skipped during discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    #[serde(default)]
    pub follow_links: bool,
}

impl DiscoveryConfig {
    pub fn extensions(&self) -> Vec<&str> {
        resolve(&self.extensions, DEFAULT_EXTENSIONS)
    }

    pub fn exclude(&self) -> Vec<&str> {
        resolve(&self.exclude, DEFAULT_EXCLUDE)
    }

    /// Same settings with the defaults written out, for display.
    pub fn resolved(&self) -> Self {
        Self {
            extensions: Some(self.extensions().into_iter().map(String::from).collect()),
            exclude: Some(self.exclude().into_iter().map(String::from).collect()),
            follow_links: self.follow_links,
        }
    }
}

fn resolve<'a>(value: &'a Option<Vec<String>>, default: &[&'static str]) -> Vec<&'a str> {
    match value {
        Some(list) => list.iter().map(String::as_str).collect(),
        None => default.to_vec(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SchemaConfig {
    /// Tool names accepted in addition to the built-in vocabulary
    #[serde(default)]
    pub extra_tools: Vec<String>,

    /// Reject frontmatter fields outside the schema
    #[serde(default)]
    pub strict_fields: bool,

    /// Fail validation when warnings are recorded
    #[serde(default)]
    pub deny_warnings: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LintConfig {
    /// Headings every agent body must contain
    #[serde(default)]
    pub required_sections: Vec<String>,
}

impl Config {
    /// Load configuration with precedence:
    /// 1. CLI flags (applied later via with_cli_overrides)
    /// 2. Environment variables
    /// 3. Explicit config file (--config)
    /// 4. Root config (.agent-catalog.toml in the discovery root)
    /// 5. Global config (~/.agent-catalog.toml)
    /// 6. Built-in defaults
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(home) = home_dir() {
            let global_config = home.join(CONFIG_FILE_NAME);
            if global_config.is_file() {
                tracing::debug!(path = %global_config.display(), "loading global config");
                config = config.merge(Self::from_file(&global_config)?);
            }
        }

        let root_config = root.join(CONFIG_FILE_NAME);
        if root_config.is_file() {
            tracing::debug!(path = %root_config.display(), "loading root config");
            config = config.merge(Self::from_file(&root_config)?);
        }

        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading explicit config");
            config = config.merge(Self::from_file(path)?);
        }

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make discovery silently match nothing
    pub fn validate(&self) -> Result<()> {
        let extensions = self.discovery.extensions();
        if extensions.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "discovery.extensions cannot be empty".to_string(),
            ));
        }
        if let Some(ext) = extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(CatalogError::InvalidConfig(format!(
                "discovery extension '{}' must be non-empty and given without a leading dot",
                ext
            )));
        }
        Ok(())
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Effective settings with discovery defaults filled in
    pub fn resolved(&self) -> Self {
        Self {
            discovery: self.discovery.resolved(),
            ..self.clone()
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(mut self, other: Self) -> Self {
        // Discovery: lists set by a later layer replace earlier ones
        if other.discovery.extensions.is_some() {
            self.discovery.extensions = other.discovery.extensions;
        }
        if other.discovery.exclude.is_some() {
            self.discovery.exclude = other.discovery.exclude;
        }
        self.discovery.follow_links = self.discovery.follow_links || other.discovery.follow_links;

        // Schema
        extend_unique(&mut self.schema.extra_tools, other.schema.extra_tools);
        self.schema.strict_fields = self.schema.strict_fields || other.schema.strict_fields;
        self.schema.deny_warnings = self.schema.deny_warnings || other.schema.deny_warnings;

        // Lint
        extend_unique(
            &mut self.lint.required_sections,
            other.lint.required_sections,
        );

        self
    }

    /// Apply environment variable overrides
    fn merge_env(mut self) -> Self {
        if env_flag("AGENT_CATALOG_DENY_WARNINGS") {
            self.schema.deny_warnings = true;
        }
        if env_flag("AGENT_CATALOG_STRICT") {
            self.schema.strict_fields = true;
        }
        self
    }

    /// Apply CLI overrides (highest precedence)
    pub fn with_cli_overrides(mut self, verbose: bool, deny_warnings: bool) -> Self {
        self.verbose = verbose;
        if deny_warnings {
            self.schema.deny_warnings = true;
        }
        self
    }
}

fn extend_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Get the home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
