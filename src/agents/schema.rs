//! Schema checks that turn a parsed header into an [`AgentDefinition`].

use super::definition::{AgentDefinition, ToolVocabulary};
use super::diagnostic::{DiagnosticKind, ValueKind};
use super::frontmatter::{Frontmatter, Header, HeaderValue};
use crate::config::Config;
use std::collections::HashSet;
use std::path::Path;

const FIELD_NAME: &str = "name";
const FIELD_DESCRIPTION: &str = "description";
const FIELD_TOOLS: &str = "tools";
const FIELD_MODEL: &str = "model";

const KNOWN_FIELDS: &[&str] = &[FIELD_NAME, FIELD_DESCRIPTION, FIELD_TOOLS, FIELD_MODEL];

/// Validation rules for one run.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub vocabulary: ToolVocabulary,

    /// Treat fields outside the schema as errors instead of ignoring them
    pub strict_fields: bool,

    /// Headings every body must contain (empty disables the lint pass)
    pub required_sections: Vec<String>,
}

impl Schema {
    pub fn from_config(config: &Config) -> Self {
        Self {
            vocabulary: ToolVocabulary::with_extra(config.schema.extra_tools.iter().cloned()),
            strict_fields: config.schema.strict_fields,
            required_sections: config.lint.required_sections.clone(),
        }
    }
}

/// A constructed definition and the non-fatal findings made along the way.
#[derive(Debug, Clone)]
pub struct Validated {
    pub definition: AgentDefinition,
    pub warnings: Vec<DiagnosticKind>,
}

/// Check `frontmatter` against `schema`.
///
/// Every rule runs so one file reports all of its problems at once.
/// `text` is the full document the frontmatter was parsed from.
pub fn validate(
    frontmatter: &Frontmatter,
    text: &str,
    source_path: &Path,
    schema: &Schema,
) -> Result<Validated, Vec<DiagnosticKind>> {
    let header = &frontmatter.header;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let identifier = required_string(header, FIELD_NAME, &mut errors);
    if let Some(name) = identifier {
        if !is_valid_identifier(name) {
            errors.push(DiagnosticKind::InvalidIdentifier(name.to_string()));
        }
    }

    let description = required_string(header, FIELD_DESCRIPTION, &mut errors).map(str::trim);
    if description == Some("") {
        errors.push(DiagnosticKind::EmptyDescription);
    }

    let declared_tools = match header.get(FIELD_TOOLS) {
        None | Some(HeaderValue::Null) => Vec::new(),
        Some(value @ (HeaderValue::List(_) | HeaderValue::String(_))) => {
            collect_tools(value, &schema.vocabulary, &mut warnings)
        }
        Some(other) => {
            errors.push(DiagnosticKind::TypeMismatch {
                field: FIELD_TOOLS,
                expected: ValueKind::List,
                actual: other.kind(),
            });
            Vec::new()
        }
    };

    let model = match header.get(FIELD_MODEL) {
        None | Some(HeaderValue::Null) => None,
        Some(HeaderValue::String(model)) => Some(model.trim().to_string()),
        Some(other) => {
            errors.push(DiagnosticKind::TypeMismatch {
                field: FIELD_MODEL,
                expected: ValueKind::String,
                actual: other.kind(),
            });
            None
        }
    };

    for key in header.keys() {
        if KNOWN_FIELDS.contains(&key.as_str()) {
            continue;
        }
        if schema.strict_fields {
            errors.push(DiagnosticKind::UnknownField(key.clone()));
        } else {
            tracing::debug!(path = %source_path.display(), field = %key, "ignoring extra field");
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    // Both are Some here: a missing or mistyped value pushed an error above.
    let (Some(identifier), Some(description)) = (identifier, description) else {
        return Err(errors);
    };

    Ok(Validated {
        definition: AgentDefinition {
            identifier: identifier.to_string(),
            description: description.to_string(),
            declared_tools,
            model,
            body: frontmatter.body(text).to_string(),
            source_path: source_path.to_path_buf(),
        },
        warnings,
    })
}

/// Identifiers are lowercase ASCII words joined by single hyphens.
pub fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty()
        && value.split('-').all(|word| {
            !word.is_empty()
                && word
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

fn required_string<'a>(
    header: &'a Header,
    field: &'static str,
    errors: &mut Vec<DiagnosticKind>,
) -> Option<&'a str> {
    match header.get(field) {
        None => {
            errors.push(DiagnosticKind::MissingField(field));
            None
        }
        Some(HeaderValue::String(value)) => Some(value.as_str()),
        Some(other) => {
            errors.push(DiagnosticKind::TypeMismatch {
                field,
                expected: ValueKind::String,
                actual: other.kind(),
            });
            None
        }
    }
}

fn collect_tools(
    value: &HeaderValue,
    vocabulary: &ToolVocabulary,
    warnings: &mut Vec<DiagnosticKind>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tools = Vec::new();

    for tool in value.to_list() {
        if !seen.insert(tool.clone()) {
            warnings.push(DiagnosticKind::DuplicateTool(tool));
            continue;
        }
        if !vocabulary.contains(&tool) {
            warnings.push(DiagnosticKind::UnknownTool(tool.clone()));
        }
        tools.push(tool);
    }

    tools
}
