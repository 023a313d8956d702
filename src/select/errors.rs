use thiserror::Error;

/// Failures raised by selectors that enforce a cardinality.
///
/// The base engine never fails; these come from selectors that need exactly
/// one target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("{target} matched 0 nodes{}", did_you_mean(.suggestion))]
    NoMatch {
        target: String,
        suggestion: Option<String>,
    },

    #[error("{target} matched {count} nodes, expected exactly 1")]
    AmbiguousMatch { target: String, count: usize },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_deref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid selector path {path:?} at byte {offset}: {message}")]
pub struct PathSyntaxError {
    pub path: String,
    pub offset: usize,
    pub message: String,
}
