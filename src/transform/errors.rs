use crate::edit::EditError;
use crate::select::SelectError;
use crate::tree::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Anything that aborts a [`Transformer`](crate::transform::Transformer)
/// run. No partial output is produced.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("failed to parse source: {0}")]
    Parse(#[from] ParseError),

    #[error("transformation '{transformation}' failed: {source}")]
    Select {
        transformation: String,
        #[source]
        source: SelectError,
    },

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
