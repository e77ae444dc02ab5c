//! Loading and validation of agent definition files.
//!
//! An agent definition is a markdown document with a frontmatter header:
//!
//! ```text
//! ---
//! name: market-research
//! description: Analyzes markets and competitors
//! tools: Read, WebSearch, WebFetch
//! ---
//! You are a market research analyst...
//! ```
//!
//! # Pipeline
//!
//! - [`frontmatter`] extracts the header mapping and locates the body
//! - [`schema`] checks required fields, types and the tool vocabulary
//! - [`registry`] folds many documents into one [`Registry`], enforcing
//!   unique identifiers
//!
//! Problems are collected as [`Diagnostic`]s; none of them abort a run.

pub mod definition;
pub mod diagnostic;
pub mod frontmatter;
pub mod registry;
pub mod schema;

pub use definition::{AgentDefinition, Tool, ToolVocabulary};
pub use diagnostic::{Diagnostic, DiagnosticKind, ValueKind};
pub use frontmatter::{Frontmatter, Header, HeaderValue};
pub use registry::{Registry, RegistryBuilder};
pub use schema::Schema;
