//! Optional checks on the body of an agent definition.
//!
//! The body is opaque to the schema validator. This pass only looks for
//! markdown headings that a project requires every agent to carry.

use crate::agents::DiagnosticKind;
use std::collections::HashSet;

/// Report each required section that has no matching ATX heading in `body`.
pub fn check_sections(body: &str, required: &[String]) -> Vec<DiagnosticKind> {
    if required.is_empty() {
        return Vec::new();
    }

    let headings = collect_headings(body);
    required
        .iter()
        .filter(|section| !headings.contains(&section.trim().to_lowercase()))
        .map(|section| DiagnosticKind::MissingSection(section.clone()))
        .collect()
}

fn collect_headings(body: &str) -> HashSet<String> {
    let mut headings = HashSet::new();
    let mut in_fence = false;

    for line in body.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(title) = heading_text(trimmed) {
            headings.insert(title.to_lowercase());
        }
    }

    headings
}

fn heading_text(line: &str) -> Option<&str> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(' ') && !rest.starts_with('\t') {
        return None;
    }
    Some(rest.trim().trim_end_matches('#').trim_end())
}
