//! Transform applicator: runs a loaded transform config over Modelica files.
//!
//! A target is either one file or a directory searched recursively for
//! `.mo` files. Each file is transformed independently; a failure on one file
//! is reported in its outcome and does not stop the others.

use crate::config::schema::TransformConfig;
use crate::edit::write_atomic;
use crate::select::PathSyntaxError;
use crate::transform::Transformer;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const MODELICA_EXTENSION: &str = "mo";

/// Result of running the transforms over a single file
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "TransformOutcome should be checked for success/failure"]
pub enum TransformOutcome {
    /// At least one edit changed the file's text
    Changed {
        file: PathBuf,
        original: String,
        output: String,
    },
    /// Transforms ran but produced identical text
    Unchanged { file: PathBuf },
    /// Parsing, selection, or edit application failed
    Failed { file: PathBuf, reason: String },
}

impl TransformOutcome {
    pub fn file(&self) -> &Path {
        match self {
            TransformOutcome::Changed { file, .. }
            | TransformOutcome::Unchanged { file }
            | TransformOutcome::Failed { file, .. } => file,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TransformOutcome::Failed { .. })
    }
}

impl fmt::Display for TransformOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformOutcome::Changed { file, .. } => write!(f, "Changed {}", file.display()),
            TransformOutcome::Unchanged { file } => write!(f, "Unchanged {}", file.display()),
            TransformOutcome::Failed { file, reason } => {
                write!(f, "Failed on {}: {}", file.display(), reason)
            }
        }
    }
}

/// Errors that prevent any file from being processed
#[derive(Debug)]
pub enum ApplicationError {
    /// A transform definition could not be turned into a selector
    Build {
        id: String,
        source: PathSyntaxError,
    },
    /// The target could not be read or walked
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Directory walk failed partway
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    /// The target holds no `.mo` files
    NoModelFiles { path: PathBuf },
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationError::Build { id, source } => {
                write!(f, "cannot build transform '{}': {}", id, source)
            }
            ApplicationError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ApplicationError::Walk { path, source } => {
                write!(f, "failed to walk {}: {}", path.display(), source)
            }
            ApplicationError::NoModelFiles { path } => {
                write!(f, "no .mo files found under {}", path.display())
            }
        }
    }
}

impl std::error::Error for ApplicationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApplicationError::Build { source, .. } => Some(source),
            ApplicationError::Io { source, .. } => Some(source),
            ApplicationError::Walk { source, .. } => Some(source),
            ApplicationError::NoModelFiles { .. } => None,
        }
    }
}

/// Turn every transform definition into a [`Transformation`] on a fresh
/// Modelica [`Transformer`], in config order.
///
/// [`Transformation`]: crate::transform::Transformation
pub fn build_transformer(config: &TransformConfig) -> Result<Transformer, ApplicationError> {
    let mut transformer = Transformer::new();
    for definition in &config.transforms {
        let transformation = definition
            .build()
            .map_err(|source| ApplicationError::Build {
                id: definition.id.clone(),
                source,
            })?;
        transformer.add(transformation);
    }
    Ok(transformer)
}

/// Apply a transform configuration to a file or directory
///
/// # Arguments
///
/// * `config` - The transform configuration to apply
/// * `target` - A `.mo` file, or a directory searched recursively
/// * `write` - Replace changed files on disk (atomically)
///
/// # Returns
///
/// One outcome per file, in path order
pub fn apply_transforms(
    config: &TransformConfig,
    target: &Path,
    write: bool,
) -> Result<Vec<TransformOutcome>, ApplicationError> {
    let mut transformer = build_transformer(config)?;
    let files = collect_model_files(target)?;
    debug!(
        target = %target.display(),
        files = files.len(),
        transforms = config.transforms.len(),
        "applying transforms"
    );

    Ok(files
        .into_iter()
        .map(|file| transform_file(&mut transformer, file, write))
        .collect())
}

fn transform_file(transformer: &mut Transformer, file: PathBuf, write: bool) -> TransformOutcome {
    let original = match fs::read_to_string(&file) {
        Ok(text) => text,
        Err(e) => {
            return TransformOutcome::Failed {
                reason: e.to_string(),
                file,
            }
        }
    };

    let output = match transformer.execute(&original) {
        Ok(output) => output,
        Err(e) => {
            warn!(file = %file.display(), error = %e, "transform failed");
            return TransformOutcome::Failed {
                reason: e.to_string(),
                file,
            };
        }
    };

    if output == original {
        return TransformOutcome::Unchanged { file };
    }

    if write {
        if let Err(e) = write_atomic(&file, &output) {
            return TransformOutcome::Failed {
                reason: e.to_string(),
                file,
            };
        }
        debug!(file = %file.display(), edits = transformer.edits().len(), "wrote file");
    }

    TransformOutcome::Changed {
        file,
        original,
        output,
    }
}

fn collect_model_files(target: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
    let metadata = fs::metadata(target).map_err(|source| ApplicationError::Io {
        path: target.to_path_buf(),
        source,
    })?;
    if metadata.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(target).sort_by_file_name() {
        let entry = entry.map_err(|source| ApplicationError::Walk {
            path: target.to_path_buf(),
            source,
        })?;
        let is_model = entry.path().extension().and_then(|e| e.to_str()) == Some(MODELICA_EXTENSION);
        if entry.file_type().is_file() && is_model {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(ApplicationError::NoModelFiles {
            path: target.to_path_buf(),
        });
    }
    Ok(files)
}
