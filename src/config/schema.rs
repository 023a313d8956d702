use crate::edit::EditOp;
use crate::select::{
    parse_path, ComponentArgSelector, ComponentDeclarationSelector, ConnectSelector,
    PathSelector, PathSyntaxError, Selector,
};
use crate::transform::Transformation;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TransformConfig {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub transforms: Vec<TransformDefinition>,
}

impl TransformConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.transforms.is_empty() {
            issues.push(ValidationIssue::EmptyTransformList);
        }

        let mut seen = HashSet::new();
        for transform in &self.transforms {
            let id = transform.id.trim();
            if id.is_empty() {
                issues.push(ValidationIssue::MissingField {
                    transform_id: None,
                    field: "id",
                });
            } else if !seen.insert(id) {
                issues.push(ValidationIssue::DuplicateId { id: id.to_string() });
            }

            let transform_id = (!id.is_empty()).then(|| id.to_string());
            transform
                .selector
                .collect_issues(transform_id.as_ref(), "selector", &mut issues);

            if let EditSpec::Insert { text, .. } = &transform.edit {
                if text.is_empty() {
                    issues.push(ValidationIssue::MissingField {
                        transform_id: transform_id.clone(),
                        field: "edit.text",
                    });
                }
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TransformDefinition {
    pub id: String,
    pub selector: SelectorSpec,
    pub edit: EditSpec,
}

impl TransformDefinition {
    /// Build the runtime transformation, labelled with this definition's id.
    pub fn build(&self) -> Result<Transformation, PathSyntaxError> {
        let selector = self.selector.build()?;
        Ok(Transformation::new(selector, self.edit.to_op()).with_label(self.id.clone()))
    }
}

/// A selector table: the selector itself plus any selectors chained after
/// it.
#[derive(Debug, Deserialize, Clone)]
pub struct SelectorSpec {
    #[serde(flatten)]
    pub kind: SelectorKind,
    #[serde(default)]
    pub chain: Vec<SelectorSpec>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SelectorKind {
    ComponentArg {
        component: String,
        argument: String,
    },
    Connect {
        a: String,
        #[serde(default)]
        b: String,
    },
    ComponentDeclaration {
        component: String,
    },
    /// Path string such as `declaration[IDENT=EM].expression`
    Path {
        path: String,
    },
}

impl SelectorSpec {
    pub fn build(&self) -> Result<Box<dyn Selector>, PathSyntaxError> {
        let head: Box<dyn Selector> = match &self.kind {
            SelectorKind::ComponentArg {
                component,
                argument,
            } => Box::new(ComponentArgSelector::new(component, argument)),
            SelectorKind::Connect { a, b } => Box::new(ConnectSelector::new(a, b)),
            SelectorKind::ComponentDeclaration { component } => {
                Box::new(ComponentDeclarationSelector::new(component))
            }
            SelectorKind::Path { path } => Box::new(PathSelector::parse(path)?),
        };

        let mut selector = head;
        for next in &self.chain {
            selector = Box::new(selector.chain(next.build()?));
        }
        Ok(selector)
    }

    fn collect_issues(
        &self,
        transform_id: Option<&String>,
        field: &'static str,
        issues: &mut Vec<ValidationIssue>,
    ) {
        let required: Vec<(&'static str, &str)> = match &self.kind {
            SelectorKind::ComponentArg {
                component,
                argument,
            } => vec![
                ("selector.component", component.as_str()),
                ("selector.argument", argument.as_str()),
            ],
            SelectorKind::Connect { a, .. } => vec![("selector.a", a.as_str())],
            SelectorKind::ComponentDeclaration { component } => {
                vec![("selector.component", component.as_str())]
            }
            SelectorKind::Path { path } => {
                if let Err(error) = parse_path(path) {
                    issues.push(ValidationIssue::InvalidPath {
                        transform_id: transform_id.cloned(),
                        field,
                        message: error.to_string(),
                    });
                }
                Vec::new()
            }
        };
        for (name, value) in required {
            if value.trim().is_empty() {
                issues.push(ValidationIssue::MissingField {
                    transform_id: transform_id.cloned(),
                    field: name,
                });
            }
        }

        for next in &self.chain {
            next.collect_issues(transform_id, "selector.chain", issues);
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EditSpec {
    Delete,
    Replace {
        text: String,
    },
    Insert {
        text: String,
        #[serde(default)]
        position: InsertPosition,
    },
}

impl EditSpec {
    pub fn to_op(&self) -> EditOp {
        match self {
            EditSpec::Delete => EditOp::delete(),
            EditSpec::Replace { text } => EditOp::replace(text.clone()),
            EditSpec::Insert { text, position } => {
                EditOp::insert(text.clone(), *position == InsertPosition::After)
            }
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InsertPosition {
    #[default]
    After,
    Before,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyTransformList,
    MissingField {
        transform_id: Option<String>,
        field: &'static str,
    },
    DuplicateId {
        id: String,
    },
    InvalidPath {
        transform_id: Option<String>,
        field: &'static str,
        message: String,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyTransformList => {
                write!(f, "transform config contains no transforms")
            }
            ValidationIssue::MissingField {
                transform_id,
                field,
            } => match transform_id {
                Some(id) => write!(f, "transform '{id}' missing required field '{field}'"),
                None => write!(f, "transform missing required field '{field}'"),
            },
            ValidationIssue::DuplicateId { id } => {
                write!(f, "transform id '{id}' is used more than once")
            }
            ValidationIssue::InvalidPath {
                transform_id,
                field,
                message,
            } => match transform_id {
                Some(id) => write!(f, "transform '{id}' has an invalid {field}: {message}"),
                None => write!(f, "transform has an invalid {field}: {message}"),
            },
        }
    }
}
