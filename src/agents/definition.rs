//! Data structures for validated agent definitions.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// An agent definition parsed from a markdown file.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDefinition {
    /// Unique key from the `name` field
    pub identifier: String,

    /// Trimmed, non-empty summary
    pub description: String,

    /// Declared tools in file order, without duplicates
    pub declared_tools: Vec<String>,

    /// Optional model hint
    pub model: Option<String>,

    /// Instructional prose after the header
    pub body: String,

    pub source_path: PathBuf,
}

/// Tools the host assistant is known to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tool {
    Read,
    Write,
    Edit,
    MultiEdit,
    Grep,
    Glob,
    Ls,
    Bash,
    WebSearch,
    WebFetch,
    AskUserQuestion,
    TodoWrite,
    NotebookEdit,
    NotebookRead,
    Task,
}

impl Tool {
    pub const ALL: &'static [Tool] = &[
        Tool::Read,
        Tool::Write,
        Tool::Edit,
        Tool::MultiEdit,
        Tool::Grep,
        Tool::Glob,
        Tool::Ls,
        Tool::Bash,
        Tool::WebSearch,
        Tool::WebFetch,
        Tool::AskUserQuestion,
        Tool::TodoWrite,
        Tool::NotebookEdit,
        Tool::NotebookRead,
        Tool::Task,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::Read => "Read",
            Tool::Write => "Write",
            Tool::Edit => "Edit",
            Tool::MultiEdit => "MultiEdit",
            Tool::Grep => "Grep",
            Tool::Glob => "Glob",
            Tool::Ls => "LS",
            Tool::Bash => "Bash",
            Tool::WebSearch => "WebSearch",
            Tool::WebFetch => "WebFetch",
            Tool::AskUserQuestion => "AskUserQuestion",
            Tool::TodoWrite => "TodoWrite",
            Tool::NotebookEdit => "NotebookEdit",
            Tool::NotebookRead => "NotebookRead",
            Tool::Task => "Task",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .iter()
            .copied()
            .find(|tool| tool.as_str() == s)
            .ok_or(())
    }
}

/// The set of tool names accepted without a warning.
#[derive(Debug, Clone, Default)]
pub struct ToolVocabulary {
    extra: BTreeSet<String>,
}

impl ToolVocabulary {
    /// Built-in tools plus project-specific names from configuration
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extra: extra.into_iter().map(Into::into).collect(),
        }
    }

    /// Tool names are case-sensitive, matching how the host spells them.
    pub fn contains(&self, name: &str) -> bool {
        name.parse::<Tool>().is_ok() || self.extra.contains(name)
    }
}
