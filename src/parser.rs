use std::collections::HashMap;

use thiserror::Error;

use crate::ir::{NodeId, ROOT, Tree};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("outline has no entries")]
    EmptyInput,
    #[error("line {line}: entry has no label")]
    MissingLabel { line: usize },
}

/// Splits the source into an option map and the outline body.
///
/// A header exists only when a `---` line is present: everything above it is
/// read as `key=value` pairs (unknown keys ignored by the consumer, duplicate
/// keys keep the last value), everything below is the outline. Without the
/// separator the whole input is outline text.
pub fn split_source(source: &str) -> (HashMap<String, String>, String) {
    let Some(sep) = source.lines().position(|line| line.trim() == "---") else {
        return (HashMap::new(), source.to_string());
    };

    let mut options = HashMap::new();
    let lines: Vec<&str> = source.lines().collect();
    for line in &lines[..sep] {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some((key, value)) = trimmed.split_once('=') {
            options.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    let body = lines[sep + 1..].join("\n");
    (options, body)
}

/// Parses an indentation-delimited outline into a [`Tree`].
///
/// One entry per non-blank line, `label` or `label|color`. The first line is
/// the root regardless of its indentation. Parent/child relations come from
/// leading-whitespace counts: a line attaches to the nearest earlier line
/// with strictly smaller indentation. Each leading tab counts as one
/// whitespace character, the same as a space.
pub fn parse_outline(input: &str) -> Result<Tree, ParseError> {
    let mut entries = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((root_line, root_raw)) = entries.next() else {
        return Err(ParseError::EmptyInput);
    };
    let (label, color) = split_entry(root_raw, root_line + 1)?;
    let mut tree = Tree::with_root(label, color);

    // Stack of (node, indent); the root entry is never popped, so every
    // line finds an ancestor.
    let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];

    for (idx, raw_line) in entries {
        let indent = count_indent(raw_line);
        while stack.len() > 1 && stack.last().is_some_and(|&(_, d)| d >= indent) {
            stack.pop();
        }
        let (label, color) = split_entry(raw_line, idx + 1)?;
        let parent = stack.last().map(|&(id, _)| id).unwrap_or(ROOT);
        let id = tree.add_child(parent, label, color);
        stack.push((id, indent));
    }

    Ok(tree)
}

fn count_indent(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn split_entry(raw: &str, line: usize) -> Result<(String, Option<String>), ParseError> {
    let trimmed = raw.trim();
    let (label, color) = match trimmed.split_once('|') {
        Some((left, right)) => {
            let color = right.trim();
            (
                left.trim(),
                (!color.is_empty()).then(|| color.to_string()),
            )
        }
        None => (trimmed, None),
    };
    if label.is_empty() {
        return Err(ParseError::MissingLabel { line });
    }
    Ok((label.to_string(), color))
}
