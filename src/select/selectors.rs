use crate::select::engine::{select, select_path, PathStep};
use crate::select::errors::{PathSyntaxError, SelectError};
use crate::select::path::parse_path;
use crate::tree::Node;
use std::str::FromStr;

/// A query over a syntax tree.
///
/// Implementors return matches in document order. Built-in selectors and
/// user-defined ones compose the same way, through [`Selector::chain`].
pub trait Selector {
    fn select<'t>(&self, root: Node<'t>) -> Result<Vec<Node<'t>>, SelectError>;

    /// Short human-readable form used in logs and errors.
    fn describe(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    /// Run `next` from every node this selector matches and concatenate the
    /// results.
    fn chain<S>(self, next: S) -> Chain<Self, S>
    where
        Self: Sized,
        S: Selector,
    {
        Chain { head: self, next }
    }
}

impl<S: Selector + ?Sized> Selector for Box<S> {
    fn select<'t>(&self, root: Node<'t>) -> Result<Vec<Node<'t>>, SelectError> {
        (**self).select(root)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Flat-map composition built by [`Selector::chain`].
///
/// `a.chain(b).chain(c)` runs `b` from each match of `a`, then `c` from each
/// match of that.
#[derive(Debug, Clone)]
pub struct Chain<A, B> {
    head: A,
    next: B,
}

impl<A: Selector, B: Selector> Selector for Chain<A, B> {
    fn select<'t>(&self, root: Node<'t>) -> Result<Vec<Node<'t>>, SelectError> {
        let mut results = Vec::new();
        for node in self.head.select(root)? {
            results.extend(self.next.select(node)?);
        }
        Ok(results)
    }

    fn describe(&self) -> String {
        format!("{} > {}", self.head.describe(), self.next.describe())
    }
}

/// Selector over an explicit list of path steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSelector {
    steps: Vec<PathStep>,
}

impl PathSelector {
    pub fn new(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    /// Parse the `rule[field=value].rule` path syntax.
    pub fn parse(path: &str) -> Result<Self, PathSyntaxError> {
        parse_path(path).map(Self::new)
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl FromStr for PathSelector {
    type Err = PathSyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Selector for PathSelector {
    fn select<'t>(&self, root: Node<'t>) -> Result<Vec<Node<'t>>, SelectError> {
        Ok(select_path(root, &self.steps))
    }

    fn describe(&self) -> String {
        self.steps
            .iter()
            .map(PathStep::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// The initializer expression of a named argument on a named component,
/// e.g. the `1` in `EMF EM(k=1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentArgSelector {
    component: String,
    argument: String,
    path: PathSelector,
}

impl ComponentArgSelector {
    pub fn new(component: impl Into<String>, argument: impl Into<String>) -> Self {
        let component = component.into();
        let argument = argument.into();
        let path = PathSelector::new(vec![
            PathStep::rule("declaration").where_child("IDENT", component.as_str()),
            PathStep::rule("element_modification").where_child("name", argument.as_str()),
            PathStep::rule("expression"),
        ]);
        Self {
            component,
            argument,
            path,
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }
}

impl Selector for ComponentArgSelector {
    fn select<'t>(&self, root: Node<'t>) -> Result<Vec<Node<'t>>, SelectError> {
        self.path.select(root)
    }

    fn describe(&self) -> String {
        format!("component-arg({}.{})", self.component, self.argument)
    }
}

/// `connect(...)` clauses with `a` as one of their endpoints.
///
/// Only `a` filters the match; `b` is recorded for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectSelector {
    a: String,
    b: String,
}

impl ConnectSelector {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }
}

impl Selector for ConnectSelector {
    fn select<'t>(&self, root: Node<'t>) -> Result<Vec<Node<'t>>, SelectError> {
        Ok(select(
            root,
            "connect_clause",
            Some("component_reference"),
            Some(&self.a),
        ))
    }

    fn describe(&self) -> String {
        format!("connect({}, {})", self.a, self.b)
    }
}

/// The full `component_declaration` of exactly one named component,
/// including its description string and annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDeclarationSelector {
    component: String,
}

impl ComponentDeclarationSelector {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    fn closest_identifier(&self, root: Node<'_>) -> Option<String> {
        select(root, "declaration", None, None)
            .into_iter()
            .filter_map(|decl| decl.children_by_field("IDENT").next())
            .map(|ident| ident.text())
            .map(|name| (strsim::jaro_winkler(name, &self.component), name))
            .filter(|(score, _)| *score >= 0.8)
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, name)| name.to_string())
    }
}

impl Selector for ComponentDeclarationSelector {
    fn select<'t>(&self, root: Node<'t>) -> Result<Vec<Node<'t>>, SelectError> {
        let matched = select(root, "declaration", Some("IDENT"), Some(&self.component));
        match matched.as_slice() {
            [] => Err(SelectError::NoMatch {
                target: self.describe(),
                suggestion: self.closest_identifier(root),
            }),
            [declaration] => Ok(vec![declaration.parent().unwrap_or(*declaration)]),
            many => Err(SelectError::AmbiguousMatch {
                target: self.describe(),
                count: many.len(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("component-declaration({})", self.component)
    }
}
