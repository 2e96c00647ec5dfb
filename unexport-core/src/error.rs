//! Typed error handling for unexport.
//!
//! Every variant here is a setup-level failure that aborts the run. A renamer
//! refusing a single rename is not an error: it is a normal
//! [`RenameOutcome::Refused`](crate::renamer::RenameOutcome::Refused).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for unexport operations.
#[derive(Error, Debug)]
pub enum UnexportError {
    /// I/O error when reading source files or directories
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Go source that cannot be turned into a usable syntax tree
    #[error("Parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A target specifier that does not resolve to loadable packages
    #[error("Load error for {target}: {message}")]
    Load { target: String, message: String },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Name that cannot be unexported (empty)
    #[error("Invalid name {name:?}: {message}")]
    InvalidName { name: String, message: String },

    /// The rename tool could not be run at all
    #[error("Renamer {program} could not be run: {message}")]
    Renamer {
        program: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Writing tool output failed
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl UnexportError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a parse error.
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a load error for a target specifier.
    pub fn load(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Load {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-name error.
    pub fn invalid_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a renamer error from a failed process spawn.
    pub fn renamer(program: impl Into<String>, err: std::io::Error) -> Self {
        Self::Renamer {
            program: program.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Parse { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for unexport results.
pub type UnexportResult<T> = Result<T, UnexportError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> UnexportResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> UnexportResult<T> {
        self.map_err(|e| UnexportError::io(path, e))
    }
}
