//! Per-file diagnostics recorded while building a registry.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Shape of a frontmatter value, used in type mismatch reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Bool,
    List,
    Null,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Number => "number",
            ValueKind::Bool => "bool",
            ValueKind::List => "list",
            ValueKind::Null => "null",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can go wrong with a single agent definition file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("document is empty")]
    EmptyDocument,

    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be a {expected}, found {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("invalid identifier '{0}' (expected lowercase words separated by single hyphens)")]
    InvalidIdentifier(String),

    #[error("description is empty")]
    EmptyDescription,

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("tool '{0}' is declared more than once")]
    DuplicateTool(String),

    #[error("missing section heading '{0}'")]
    MissingSection(String),

    #[error("duplicate identifier '{identifier}' (first defined in {})", first_path.display())]
    DuplicateIdentifier {
        identifier: String,
        first_path: PathBuf,
        second_path: PathBuf,
    },

    #[error("unreadable file: {0}")]
    Unreadable(String),
}

impl DiagnosticKind {
    /// Fatal diagnostics exclude the file from the registry.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            DiagnosticKind::UnknownTool(_)
                | DiagnosticKind::DuplicateTool(_)
                | DiagnosticKind::MissingSection(_)
        )
    }
}

/// A diagnostic tagged with the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source_path: PathBuf,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(source_path: impl Into<PathBuf>, kind: DiagnosticKind) -> Self {
        Self {
            source_path: source_path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &Path {
        &self.source_path
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source_path.display(), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_kinds_are_not_fatal() {
        assert!(!DiagnosticKind::UnknownTool("FooBar".to_string()).is_fatal());
        assert!(!DiagnosticKind::DuplicateTool("Read".to_string()).is_fatal());
        assert!(!DiagnosticKind::MissingSection("Methodology".to_string()).is_fatal());
        assert!(DiagnosticKind::EmptyDocument.is_fatal());
        assert!(DiagnosticKind::MissingField("name").is_fatal());
    }

    #[test]
    fn test_type_mismatch_message() {
        let kind = DiagnosticKind::TypeMismatch {
            field: "name",
            expected: ValueKind::String,
            actual: ValueKind::List,
        };
        assert_eq!(kind.to_string(), "field 'name' must be a string, found list");
    }

    #[test]
    fn test_duplicate_identifier_display_names_both_paths() {
        let diagnostic = Diagnostic::new(
            "agents/b.md",
            DiagnosticKind::DuplicateIdentifier {
                identifier: "frontend-developer".to_string(),
                first_path: PathBuf::from("agents/a.md"),
                second_path: PathBuf::from("agents/b.md"),
            },
        );
        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("agents/b.md: "));
        assert!(rendered.contains("first defined in agents/a.md"));
    }
}
