//! Error types for Helium
//!
//! Nothing on the validation path returns these to the editor: parser and
//! scan failures are folded into diagnostics or scan outcomes. They surface
//! from configuration loading and from the CLI.

use std::path::PathBuf;

use thiserror::Error;

pub type HeliumResult<T> = std::result::Result<T, HeliumError>;

#[derive(Debug, Error)]
pub enum HeliumError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Artifact(#[from] ArtifactError),

    #[error("{0}")]
    Index(#[from] IndexError),

    #[error("{0}")]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failures reading a generated artifact (rules or built-in metadata)
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    Missing(PathBuf),

    #[error("Artifact {path} has no entries")]
    Empty { path: PathBuf },

    #[error("Malformed artifact {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while scanning files for the workspace index
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },

    #[error("Not a file URI: {0}")]
    InvalidUri(String),
}

impl IndexError {
    /// Path the failure relates to, when known
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Read { path, .. } | Self::Walk { path, .. } => Some(path),
            Self::InvalidUri(_) => None,
        }
    }

    /// True for failures caused by the file or directory not existing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("Parser not generated yet. {hint}")]
    Unavailable { hint: String },
}
