use crate::edit::{Edit, EditFactory, EditOp};
use crate::select::{ComponentArgSelector, SelectError, Selector};
use crate::tree::Node;
use std::fmt;

/// One selector paired with one edit factory.
///
/// Immutable once built. Every node the selector matches becomes one edit.
pub struct Transformation {
    selector: Box<dyn Selector>,
    edit: Box<dyn EditFactory>,
    label: Option<String>,
}

impl Transformation {
    pub fn new(selector: impl Selector + 'static, edit: impl EditFactory + 'static) -> Self {
        Self {
            selector: Box::new(selector),
            edit: Box::new(edit),
            label: None,
        }
    }

    /// Name used in logs and errors instead of the selector description.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| self.selector.describe())
    }

    pub fn selector(&self) -> &dyn Selector {
        self.selector.as_ref()
    }

    /// Run the selector from `root` and map every match through the edit
    /// factory, in match order.
    pub fn resolve(&self, root: Node<'_>) -> Result<Vec<Edit>, SelectError> {
        let nodes = self.selector.select(root)?;
        Ok(nodes.into_iter().map(|node| self.edit.make(node)).collect())
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformation")
            .field("selector", &self.selector.describe())
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Set the value of a named argument on a named component, e.g.
/// `EMF EM(k=1)` to `EMF EM(k=8)`.
pub fn replace_component_argument_value(
    component: impl Into<String>,
    argument: impl Into<String>,
    value: impl Into<String>,
) -> Transformation {
    Transformation::new(
        ComponentArgSelector::new(component, argument),
        EditOp::replace(value),
    )
}
