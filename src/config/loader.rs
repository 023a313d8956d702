use crate::config::schema::{TransformConfig, ValidationError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Failure to read, parse, or validate a transform file.
///
/// Errors from [`load_from_str`] carry no path; [`load_from_path`] fills it
/// in so messages name the offending file.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    /// The file this error refers to, when known.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Io { path, .. } => Some(path),
            ConfigError::Toml { path, .. } | ConfigError::Validation { path, .. } => {
                path.as_deref()
            }
        }
    }

    fn at(self, file: &Path) -> Self {
        match self {
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(file.to_path_buf()),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(file.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|p| format!(" ({})", p.display()))
                .unwrap_or_default()
        };
        match self {
            ConfigError::Io { path, source } => write!(
                f,
                "failed to read transform config from {}: {source}",
                path.display()
            ),
            ConfigError::Toml { path, source } => write!(
                f,
                "failed to parse transform config TOML{}: {source}",
                location(path)
            ),
            ConfigError::Validation { path, source } => {
                write!(f, "invalid transform config{}: {source}", location(path))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

/// Deserialize and validate a transform file's contents.
pub fn load_from_str(input: &str) -> Result<TransformConfig, ConfigError> {
    let config: TransformConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    debug!(
        name = %config.meta.name,
        transforms = config.transforms.len(),
        "loaded transform config"
    );
    Ok(config)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<TransformConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents).map_err(|error| error.at(path))
}
