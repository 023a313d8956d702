//! Human-readable and JSON views of what a selector matched.

use crate::tree::Node;
use serde::Serialize;
use std::fmt::Write;

const MAX_CELL: usize = 35;

/// Serializable summary of one matched node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub rule: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl MatchSummary {
    pub fn from_node(node: Node<'_>) -> Self {
        let span = node.span();
        Self {
            rule: node.rule().to_string(),
            start: span.start,
            end: span.end,
            text: node.text().to_string(),
        }
    }
}

/// Render each match as its rule followed by a two-row table of its
/// children: rule names on top, texts below.
///
/// ```text
/// Selector: component-declaration(DC)
/// [1] component_declaration
///     declaration                         | comment
///     DC(V=60)                            | "DC source"
/// ```
pub fn describe_matches(selector: &str, nodes: &[Node<'_>]) -> String {
    let mut out = format!("Selector: {selector}\n");
    if nodes.is_empty() {
        out.push_str("(no matches)\n");
        return out;
    }

    for (i, node) in nodes.iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", i + 1, node.rule());
        if node.is_leaf() {
            let _ = writeln!(out, "    {}", cell(node.text()));
            continue;
        }

        let rules: Vec<String> = node.children().map(|c| c.rule().to_string()).collect();
        let texts: Vec<String> = node.children().map(|c| cell(c.text())).collect();
        let widths: Vec<usize> = rules
            .iter()
            .zip(&texts)
            .map(|(r, t)| r.chars().count().max(t.chars().count()))
            .collect();

        let _ = writeln!(out, "    {}", row(&rules, &widths));
        let _ = writeln!(out, "    {}", row(&texts, &widths));
    }
    out
}

fn row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Collapse whitespace runs and cap the length.
fn cell(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_CELL {
        return collapsed;
    }
    let mut truncated: String = collapsed.chars().take(MAX_CELL - 2).collect();
    truncated.push_str("..");
    truncated
}
