//! Catalog rendering. Everything here is derived from a [`Registry`] and
//! recomputed on demand; callers decide where the output goes.

use crate::agents::Registry;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    pub tools: Vec<String>,
    pub model: Option<String>,
    pub path: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    /// Sorted by name
    pub agents: Vec<CatalogEntry>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Catalog {
    /// Entries are rendered even when the registry recorded errors.
    pub fn from_registry(registry: &Registry) -> Self {
        let mut agents: Vec<CatalogEntry> = registry
            .entries
            .values()
            .map(|def| CatalogEntry {
                name: def.identifier.clone(),
                description: def.description.clone(),
                tools: def.declared_tools.clone(),
                model: def.model.clone(),
                path: def.source_path.display().to_string(),
            })
            .collect();
        agents.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            agents,
            errors: registry.errors.iter().map(ToString::to_string).collect(),
            warnings: registry.warnings.iter().map(ToString::to_string).collect(),
        }
    }

    /// `(name, description)` pairs in catalog order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.agents
            .iter()
            .map(|entry| (entry.name.as_str(), entry.description.as_str()))
    }

    /// One aligned `name  description` line per agent.
    pub fn render_list(&self) -> String {
        let width = self.agents.iter().map(|e| e.name.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (name, description) in self.pairs() {
            out.push_str(&format!(
                "{:<width$}  {}\n",
                name,
                single_line(description),
                width = width
            ));
        }
        out
    }

    /// Markdown table for README generation.
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("## Agents ({})\n\n", self.agents.len()));
        out.push_str("| Agent | Description | Tools |\n");
        out.push_str("|-------|-------------|-------|\n");
        for entry in &self.agents {
            let tools = if entry.tools.is_empty() {
                "-".to_string()
            } else {
                entry.tools.join(", ")
            };
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                entry.name,
                escape_cell(&entry.description),
                escape_cell(&tools)
            ));
        }
        out
    }

    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}
