//! Structured-text extraction over `launchctl print` dumps.
//!
//! The dump is line oriented: blocks open with `name = {` and close with a
//! lone `}` at the opener's indentation, scalars are `key = value`, list
//! entries are bare lines and dictionary entries are `key => value`.
//!
//! Everything here borrows from the input text and allocates only maps.

use std::collections::{BTreeMap, HashMap};

use regex::Regex;

use crate::domain::error::ParseError;

/// Default separator between dictionary keys and values.
pub const DICT_SEPARATOR: &str = " => ";

// ── Line tokenizer ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    /// `name = {` (quotes around `name` stripped).
    Open(&'a str),
    /// Any other line ending in `{`. Never extracted.
    OpenAnonymous,
    /// A lone `}`.
    Close,
    Entry,
}

#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    indent: &'a str,
    kind: LineKind<'a>,
    /// Byte offset of the line start in the source text.
    start: usize,
    /// Byte offset just past the line content (before `\n`).
    end: usize,
}

fn tokenize(text: &str) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;
    for raw in text.split('\n') {
        let end = start + raw.len();
        let content = raw.trim_end_matches('\r');
        let trimmed = content.trim_start_matches([' ', '\t']);
        let indent = &content[..content.len() - trimmed.len()];
        let kind = classify(trimmed.trim_end());
        lines.push(Line {
            indent,
            kind,
            start,
            end,
        });
        start = end + 1;
    }
    lines
}

fn classify(trimmed: &str) -> LineKind<'_> {
    if trimmed == "}" {
        return LineKind::Close;
    }
    if let Some(head) = trimmed.strip_suffix(" = {") {
        let name = head.strip_prefix('"').unwrap_or(head);
        let name = name.strip_suffix('"').unwrap_or(name);
        return LineKind::Open(name);
    }
    if trimmed.ends_with('{') {
        return LineKind::OpenAnonymous;
    }
    LineKind::Entry
}

// ── Container extraction ──────────────────────────────────────────────────────

/// Index of the first lone `}` at exactly the opener's indentation.
fn close_by_indent(lines: &[Line<'_>], open: usize) -> Option<usize> {
    let indent = lines[open].indent;
    lines
        .iter()
        .enumerate()
        .skip(open + 1)
        .find(|(_, line)| line.kind == LineKind::Close && line.indent == indent)
        .map(|(idx, _)| idx)
}

/// Whether a block opens in the body at the outer opener's own indentation.
///
/// Such a sibling owns the closer the indentation rule picked.
fn has_sibling_opener(lines: &[Line<'_>], open: usize, close: usize) -> bool {
    let indent = lines[open].indent;
    lines[open + 1..close].iter().any(|line| {
        line.indent == indent && matches!(line.kind, LineKind::Open(_) | LineKind::OpenAnonymous)
    })
}

/// Find every `name = { ... }` block whose name satisfies `filter`.
///
/// A block ends at the first lone `}` with the opener's indentation; deeper
/// lines ending in `{` or reading `}` are body content. Scanning resumes
/// after each extracted block, so with no filter only the outermost blocks
/// are returned. A non-matching opener is stepped into, so a filtered search
/// finds matching blocks at any depth. Blocks that never close are skipped.
/// Later duplicates replace earlier ones.
///
/// # Errors
///
/// Returns [`ParseError::AmbiguousNesting`] when another block opens at the
/// matching opener's own indentation before its closer.
pub fn extract_containers<'a>(
    text: &'a str,
    filter: Option<&str>,
) -> Result<HashMap<&'a str, &'a str>, ParseError> {
    let lines = tokenize(text);
    let mut containers = HashMap::new();
    let mut idx = 0;
    while idx < lines.len() {
        let LineKind::Open(name) = lines[idx].kind else {
            idx += 1;
            continue;
        };
        if filter.is_some_and(|wanted| wanted != name) {
            idx += 1;
            continue;
        }
        let Some(close) = close_by_indent(&lines, idx) else {
            idx += 1;
            continue;
        };
        if has_sibling_opener(&lines, idx, close) {
            return Err(ParseError::AmbiguousNesting {
                name: name.to_string(),
                line: idx + 1,
            });
        }
        containers.insert(name, body(text, &lines, idx, close));
        idx = close + 1;
    }
    Ok(containers)
}

/// Text strictly between the opener and closer lines, verbatim.
fn body<'a>(text: &'a str, lines: &[Line<'_>], open: usize, close: usize) -> &'a str {
    if close == open + 1 {
        return "";
    }
    &text[lines[open + 1].start..lines[close - 1].end]
}

/// Body of the block named `name`.
///
/// # Errors
///
/// Returns [`ParseError::FieldNotFound`] if there is no such block.
pub fn extract_container<'a>(text: &'a str, name: &str) -> Result<&'a str, ParseError> {
    extract_containers(text, Some(name))?
        .remove(name)
        .ok_or_else(|| ParseError::not_found("container", name))
}

// ── Field extraction ──────────────────────────────────────────────────────────

/// First capture group of the first match of `pattern`.
///
/// # Errors
///
/// Returns [`ParseError::FieldNotFound`] if nothing matches.
pub fn capture<'a>(text: &'a str, pattern: &Regex) -> Result<&'a str, ParseError> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ParseError::not_found("pattern", pattern.as_str()))
}

/// Value of the first `key = value` line.
///
/// # Errors
///
/// Returns [`ParseError::FieldNotFound`] if the key is absent.
pub fn scalar<'a>(text: &'a str, key: &str) -> Result<&'a str, ParseError> {
    let needle = format!("{key} = ");
    text.split('\n')
        .find_map(|line| {
            let at = line.find(&needle)?;
            Some(line[at + needle.len()..].trim_end_matches('\r'))
        })
        .ok_or_else(|| ParseError::not_found("scalar", key))
}

/// Non-blank lines of block `key`, leading indentation stripped, in order.
///
/// # Errors
///
/// Returns [`ParseError::FieldNotFound`] if the block is absent.
pub fn list<'a>(text: &'a str, key: &str) -> Result<Vec<&'a str>, ParseError> {
    let body = extract_container(text, key)?;
    Ok(body
        .split('\n')
        .map(|line| line.trim_start().trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .collect())
}

/// Entries of block `key` split on the first `separator`.
///
/// Values may themselves contain the separator. Later keys win.
///
/// # Errors
///
/// Returns [`ParseError::FieldNotFound`] if the block is absent and
/// [`ParseError::MalformedEntry`] if a line has no separator.
pub fn dictionary(
    text: &str,
    key: &str,
    separator: &str,
) -> Result<BTreeMap<String, String>, ParseError> {
    list(text, key)?
        .into_iter()
        .map(|line| {
            line.split_once(separator)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| ParseError::MalformedEntry {
                    key: key.to_string(),
                    line: line.to_string(),
                    separator: separator.to_string(),
                })
        })
        .collect()
}
