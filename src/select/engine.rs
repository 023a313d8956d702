use crate::tree::Node;
use std::fmt;
use tracing::trace;

/// One step of a selector path: a rule name plus an optional child filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub rule: String,
    pub field: Option<String>,
    pub value: Option<String>,
}

impl PathStep {
    /// Unfiltered step matching every node of `rule`.
    pub fn rule(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            field: None,
            value: None,
        }
    }

    /// Keep only matches with a child in `field` whose text is `value`.
    pub fn where_child(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self.value = Some(value.into());
        self
    }

    /// Keep only matches that have at least one child in `field`.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self.value = None;
        self
    }

    /// Run this step from `root`.
    pub fn select<'t>(&self, root: Node<'t>) -> Vec<Node<'t>> {
        select(
            root,
            &self.rule,
            self.field.as_deref(),
            self.value.as_deref(),
        )
    }
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rule)?;
        match (&self.field, &self.value) {
            (Some(field), Some(value)) => write!(f, "[{field}={value}]"),
            (Some(field), None) => write!(f, "[{field}]"),
            _ => Ok(()),
        }
    }
}

/// Find every node of `rule` at or below `root`, in document order.
///
/// With a `field`, a match is kept once if any child in that field renders to
/// `value` (or, without a value, if the field is present at all). Rendering
/// ignores whitespace between tokens, see [`Node::rendered_text`].
/// A match lacking the field is dropped, never an error.
pub fn select<'t>(
    root: Node<'t>,
    rule: &str,
    field: Option<&str>,
    value: Option<&str>,
) -> Vec<Node<'t>> {
    let matches = root.descendants().filter(|node| node.rule() == rule);

    let Some(field) = field else {
        return matches.collect();
    };

    matches
        .filter(|node| {
            let mut children = node.children_by_field(field);
            match value {
                Some(value) => children.any(|child| child.rendered_text() == value),
                None => children.next().is_some(),
            }
        })
        .collect()
}

/// Narrow a frontier, starting at `root`, through each step in turn.
///
/// Each step is a fresh any-depth search from every node of the previous
/// frontier; results are concatenated in frontier order. An empty frontier
/// ends the walk immediately.
pub fn select_path<'t>(root: Node<'t>, path: &[PathStep]) -> Vec<Node<'t>> {
    let mut frontier = vec![root];

    for step in path {
        frontier = frontier
            .into_iter()
            .flat_map(|node| step.select(node))
            .collect();
        trace!(step = %step, matched = frontier.len(), "path step");

        if frontier.is_empty() {
            break;
        }
    }

    frontier
}
