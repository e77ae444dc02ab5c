//! Registry of validated agent definitions for one run.

use super::definition::AgentDefinition;
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::frontmatter;
use super::schema::{self, Schema};
use crate::lint;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Validated definitions keyed by identifier, plus everything that was
/// recorded along the way.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub entries: BTreeMap<String, AgentDefinition>,

    /// Fatal diagnostics in discovery order
    pub errors: Vec<Diagnostic>,

    /// Non-fatal diagnostics in discovery order
    pub warnings: Vec<Diagnostic>,
}

impl Registry {
    /// Fold `(path, text)` pairs into a registry, in the order given.
    pub fn build<I>(schema: &Schema, inputs: I) -> Self
    where
        I: IntoIterator<Item = (PathBuf, String)>,
    {
        let mut builder = RegistryBuilder::new(schema);
        for (path, text) in inputs {
            builder.add_document(&path, &text);
        }
        builder.finish()
    }

    pub fn get(&self, identifier: &str) -> Option<&AgentDefinition> {
        self.entries.get(identifier)
    }

    /// Identifiers in sorted order
    pub fn list_available(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Incremental registry construction. One bad document never stops the
/// fold; its problems are recorded and the next document is processed.
pub struct RegistryBuilder<'a> {
    schema: &'a Schema,
    registry: Registry,
}

impl<'a> RegistryBuilder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            registry: Registry::default(),
        }
    }

    pub fn add_document(&mut self, path: &Path, text: &str) {
        let parsed = match frontmatter::parse(text) {
            Ok(parsed) => parsed,
            Err(kind) => {
                tracing::debug!(path = %path.display(), error = %kind, "header rejected");
                self.record(path, kind);
                return;
            }
        };

        let validated = match schema::validate(&parsed, text, path, self.schema) {
            Ok(validated) => validated,
            Err(errors) => {
                tracing::debug!(path = %path.display(), count = errors.len(), "schema rejected");
                for kind in errors {
                    self.record(path, kind);
                }
                return;
            }
        };

        for kind in validated.warnings {
            self.record(path, kind);
        }

        let definition = validated.definition;
        for kind in lint::check_sections(&definition.body, &self.schema.required_sections) {
            self.record(path, kind);
        }

        let first_path = self
            .registry
            .entries
            .get(&definition.identifier)
            .map(|first| first.source_path.clone());
        if let Some(first_path) = first_path {
            let kind = DiagnosticKind::DuplicateIdentifier {
                identifier: definition.identifier.clone(),
                first_path,
                second_path: path.to_path_buf(),
            };
            self.record(path, kind);
            return;
        }

        tracing::debug!(path = %path.display(), identifier = %definition.identifier, "registered");
        self.registry
            .entries
            .insert(definition.identifier.clone(), definition);
    }

    /// Record a file that was discovered but could not be read as text.
    pub fn add_unreadable(&mut self, path: &Path, reason: impl Into<String>) {
        self.record(path, DiagnosticKind::Unreadable(reason.into()));
    }

    pub fn finish(self) -> Registry {
        self.registry
    }

    fn record(&mut self, path: &Path, kind: DiagnosticKind) {
        let diagnostic = Diagnostic::new(path, kind);
        if diagnostic.kind.is_fatal() {
            self.registry.errors.push(diagnostic);
        } else {
            self.registry.warnings.push(diagnostic);
        }
    }
}
