//! Frontmatter extraction for agent definition files.
//!
//! A document opens with a line containing only `---`, followed by
//! `key: value` lines and a second `---` line. Everything after the closing
//! line is the body.
//!
//! Values are read line by line rather than as a full YAML document, so a
//! description such as `Handles issue #42` or `Use this agent when: ...`
//! is kept verbatim. Quoted scalars and `[a, b]` flow lists are decoded
//! with `serde_yaml`; `- item` block lists and `|`/`>` block scalars are
//! accepted. Anything nested is rejected.

use super::diagnostic::{DiagnosticKind, ValueKind};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::iter::Peekable;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

/// A single header value. Lists are one level deep and hold scalars only.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    String(String),
    Number(String),
    Bool(bool),
    List(Vec<String>),
    Null,
}

impl HeaderValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            HeaderValue::String(_) => ValueKind::String,
            HeaderValue::Number(_) => ValueKind::Number,
            HeaderValue::Bool(_) => ValueKind::Bool,
            HeaderValue::List(_) => ValueKind::List,
            HeaderValue::Null => ValueKind::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Normalize into an ordered list of trimmed, non-empty strings.
    ///
    /// Strings are split on commas, so `tools: Read, Write` and
    /// `tools: [Read, Write]` produce the same list. Other scalars have no
    /// list form.
    pub fn to_list(&self) -> Vec<String> {
        match self {
            HeaderValue::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            HeaderValue::String(s) => split_list(s),
            HeaderValue::Number(_) | HeaderValue::Bool(_) | HeaderValue::Null => Vec::new(),
        }
    }
}

pub type Header = BTreeMap<String, HeaderValue>;

/// Parsed header plus the byte offset where the body starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter {
    pub header: Header,
    pub body_offset: usize,
}

impl Frontmatter {
    pub fn body<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.body_offset..).unwrap_or("")
    }
}

/// Parse the header block at the top of `text`.
pub fn parse(text: &str) -> Result<Frontmatter, DiagnosticKind> {
    if text.trim().is_empty() {
        return Err(DiagnosticKind::EmptyDocument);
    }

    let start = if text.starts_with(BOM) {
        BOM.len_utf8()
    } else {
        0
    };

    let mut lines = text[start..].split_inclusive('\n');
    let mut offset = start;

    match lines.next() {
        Some(first) if is_delimiter(first) => offset += first.len(),
        _ => {
            return Err(DiagnosticKind::MalformedHeader(
                "document does not start with '---'".to_string(),
            ))
        }
    }

    let header_start = offset;
    let mut header_end = None;
    for line in lines {
        if is_delimiter(line) {
            header_end = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }

    let Some((header_end, body_offset)) = header_end else {
        return Err(DiagnosticKind::MalformedHeader(
            "closing '---' not found".to_string(),
        ));
    };

    let header = parse_header(&text[header_start..header_end])?;

    Ok(Frontmatter {
        header,
        body_offset,
    })
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn parse_header(block: &str) -> Result<Header, DiagnosticKind> {
    let mut header = Header::new();
    let mut lines = block.lines().enumerate().peekable();

    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if is_indented(line) {
            return Err(malformed(index, "unexpected indentation outside a field"));
        }
        if is_list_item(trimmed) {
            return Err(malformed(index, "list item outside a field"));
        }
        let Some((key, rest)) = split_field(trimmed) else {
            return Err(malformed(index, "expected 'key: value'"));
        };
        if header.contains_key(key) {
            return Err(malformed(index, &format!("duplicate field '{}'", key)));
        }

        let continuation = take_continuation(&mut lines);
        let value =
            field_value(key, rest, &continuation).map_err(|reason| malformed(index, &reason))?;
        header.insert(key.to_string(), value);
    }

    Ok(header)
}

fn malformed(index: usize, reason: &str) -> DiagnosticKind {
    // Header lines start on line 2 of the document.
    DiagnosticKind::MalformedHeader(format!("line {}: {}", index + 2, reason))
}

/// Split `key: value` at the first colon. The key is a single token and
/// the colon is followed by whitespace or the end of the line.
fn split_field(line: &str) -> Option<(&str, &str)> {
    let (key, rest) = line.split_once(':')?;
    let key = key.trim_end();
    if key.is_empty() || key.contains(char::is_whitespace) || key.starts_with(['-', '#']) {
        return None;
    }
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }
    Some((key, rest.trim()))
}

fn is_indented(line: &str) -> bool {
    line.starts_with([' ', '\t'])
}

fn is_list_item(trimmed: &str) -> bool {
    trimmed == "-" || trimmed.starts_with("- ")
}

fn list_item(trimmed: &str) -> Option<&str> {
    if trimmed == "-" {
        return Some("");
    }
    trimmed.strip_prefix("- ").map(str::trim)
}

/// Lines belonging to the field above: indented, blank, or block list items.
fn take_continuation<'a>(
    lines: &mut Peekable<impl Iterator<Item = (usize, &'a str)>>,
) -> Vec<&'a str> {
    let mut taken = Vec::new();
    while let Some(&(_, line)) = lines.peek() {
        let trimmed = line.trim();
        if !(trimmed.is_empty() || is_indented(line) || is_list_item(trimmed)) {
            break;
        }
        taken.push(line);
        lines.next();
    }
    while taken.last().is_some_and(|line| line.trim().is_empty()) {
        taken.pop();
    }
    taken
}

fn field_value(key: &str, rest: &str, continuation: &[&str]) -> Result<HeaderValue, String> {
    if is_block_indicator(rest) {
        return Ok(HeaderValue::String(block_scalar(rest, continuation)));
    }
    if rest.is_empty() {
        return block_value(key, continuation);
    }
    if continuation
        .iter()
        .any(|line| !is_indented(line) && !line.trim().is_empty())
    {
        return Err(format!("field '{}' has both a value and list items", key));
    }

    let mut joined = rest.to_string();
    for line in continuation.iter().map(|line| line.trim()) {
        if !line.is_empty() {
            joined.push(' ');
            joined.push_str(line);
        }
    }
    decode_inline(key, &joined)
}

/// Value of a field whose line ends at the colon: a block list, a plain
/// scalar continued on indented lines, or null.
fn block_value(key: &str, continuation: &[&str]) -> Result<HeaderValue, String> {
    let content: Vec<&str> = continuation
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    let Some(first) = content.first() else {
        return Ok(HeaderValue::Null);
    };

    if is_list_item(first) {
        let mut items = Vec::with_capacity(content.len());
        for line in &content {
            let Some(item) = list_item(line) else {
                return Err(format!("field '{}' mixes list items with other text", key));
            };
            if let Some(item) = decode_item(key, item)? {
                items.push(item);
            }
        }
        return Ok(HeaderValue::List(items));
    }

    if split_field(first).is_some() {
        return Err(format!("field '{}' holds a nested mapping", key));
    }
    decode_inline(key, &content.join(" "))
}

fn decode_item(key: &str, item: &str) -> Result<Option<String>, String> {
    if is_list_item(item) {
        return Err(format!("field '{}' holds a nested list inside a list", key));
    }
    if split_field(item).is_some() {
        return Err(format!("field '{}' holds a nested mapping inside a list", key));
    }
    match decode_inline(key, item)? {
        HeaderValue::Null => Ok(None),
        HeaderValue::Bool(b) => Ok(Some(b.to_string())),
        HeaderValue::String(s) | HeaderValue::Number(s) => Ok(Some(s)),
        HeaderValue::List(_) => Err(format!("field '{}' holds a nested list inside a list", key)),
    }
}

/// Decode a single-line value. Plain text is kept verbatim, so `#` and
/// `: ` inside a description are content, not syntax.
fn decode_inline(key: &str, raw: &str) -> Result<HeaderValue, String> {
    match raw.chars().next() {
        Some('"') | Some('\'') => serde_yaml::from_str::<String>(raw)
            .map(HeaderValue::String)
            .map_err(|e| format!("field '{}' has a malformed quoted value: {}", key, e)),
        Some('[') => decode_flow_list(key, raw),
        Some('{') => Err(format!("field '{}' holds a nested mapping", key)),
        _ => Ok(plain_scalar(raw)),
    }
}

fn decode_flow_list(key: &str, raw: &str) -> Result<HeaderValue, String> {
    let value: Value = serde_yaml::from_str(raw)
        .map_err(|e| format!("field '{}' has a malformed list: {}", key, e))?;
    let Value::Sequence(items) = value else {
        return Err(format!(
            "field '{}' holds a {} instead of a list",
            key,
            describe(&value)
        ));
    };

    let mut list = Vec::with_capacity(items.len());
    for item in items {
        match convert_scalar(&item) {
            Some(HeaderValue::Null) => {}
            Some(HeaderValue::Bool(b)) => list.push(b.to_string()),
            Some(HeaderValue::String(s)) | Some(HeaderValue::Number(s)) => list.push(s),
            _ => {
                return Err(format!(
                    "field '{}' holds a nested {} inside a list",
                    key,
                    describe(&item)
                ))
            }
        }
    }
    Ok(HeaderValue::List(list))
}

fn plain_scalar(raw: &str) -> HeaderValue {
    match raw {
        "" | "~" | "null" | "Null" | "NULL" => HeaderValue::Null,
        "true" | "True" | "TRUE" => HeaderValue::Bool(true),
        "false" | "False" | "FALSE" => HeaderValue::Bool(false),
        _ if is_number(raw) => HeaderValue::Number(raw.to_string()),
        _ => HeaderValue::String(raw.to_string()),
    }
}

fn is_number(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    digits.starts_with(|c: char| c.is_ascii_digit()) && raw.parse::<f64>().is_ok()
}

fn is_block_indicator(rest: &str) -> bool {
    matches!(rest, "|" | "|-" | "|+" | ">" | ">-" | ">+")
}

/// `|` keeps line breaks, `>` folds them into spaces. A trailing `-`
/// strips the final newline.
fn block_scalar(indicator: &str, continuation: &[&str]) -> String {
    let indent = continuation
        .iter()
        .find(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .unwrap_or(0);
    let lines: Vec<&str> = continuation
        .iter()
        .map(|line| {
            if line.len() - line.trim_start().len() >= indent {
                &line[indent..]
            } else {
                line.trim_start()
            }
        })
        .collect();

    let mut text = if indicator.starts_with('>') {
        fold_lines(&lines)
    } else {
        lines.join("\n")
    };
    if !indicator.ends_with('-') {
        text.push('\n');
    }
    text
}

fn fold_lines(lines: &[&str]) -> String {
    let mut folded = String::new();
    let mut at_break = true;
    for line in lines {
        if line.trim().is_empty() {
            folded.push('\n');
            at_break = true;
            continue;
        }
        if !at_break {
            folded.push(' ');
        }
        folded.push_str(line);
        at_break = false;
    }
    folded
}

fn convert_scalar(value: &Value) -> Option<HeaderValue> {
    match value {
        Value::Null => Some(HeaderValue::Null),
        Value::Bool(b) => Some(HeaderValue::Bool(*b)),
        Value::Number(n) => Some(HeaderValue::Number(n.to_string())),
        Value::String(s) => Some(HeaderValue::String(s.clone())),
        _ => None,
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
