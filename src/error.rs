//! Application error type.
//!
//! All fallible operations in the crate return `ItrfError`. The variants map
//! onto the failure classes of the tool:
//!
//! - I/O and catalog-format problems (bad header, broken fixed-column layout)
//! - malformed PSD models (unknown tag, wrong parameter count)
//! - bad geodetic constants
//! - numeric domain violations (e.g. a logarithmic PSD model evaluated where
//!   its argument is non-positive)
//!
//! Errors carry enough context (file label + approximate line number for
//! catalog errors) to diagnose a broken catalog without a debugger.

use std::path::Path;

/// Errors produced by catalog readers, the model evaluator, the coordinate
/// transforms and the pipeline.
#[derive(Clone, PartialEq)]
pub enum ItrfError {
    /// Failed to open or read a file.
    Io { path: String, message: String },
    /// A catalog line does not match the expected fixed-column layout, or a
    /// cross-line consistency check failed.
    CatalogFormat {
        file: String,
        line: usize,
        message: String,
    },
    /// A PSD model tag outside the closed set [0, 4].
    InvalidModelTag { tag: i64 },
    /// A PSD model with the wrong number of parameters, or non-finite /
    /// degenerate parameter values.
    InvalidParameters { message: String },
    /// Geodetic constants outside their valid ranges.
    InvalidEllipsoid { message: String },
    /// A numeric domain violation during model evaluation.
    Domain { message: String },
    /// Invalid user input (bad epoch string, empty station list, ...).
    Usage { message: String },
}

impl ItrfError {
    /// Process exit code for the binary: 2 for input/format/usage problems,
    /// 4 for numeric domain failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            ItrfError::Domain { .. } => 4,
            _ => 2,
        }
    }

    pub fn io(path: &Path, err: &std::io::Error) -> Self {
        ItrfError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub fn catalog(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        ItrfError::CatalogFormat {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        ItrfError::Usage {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ItrfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItrfError::Io { path, message } => write!(f, "I/O error on '{path}': {message}"),
            ItrfError::CatalogFormat {
                file,
                line,
                message,
            } => write!(f, "Catalog format error ({file}, line ~{line}): {message}"),
            ItrfError::InvalidModelTag { tag } => {
                write!(f, "Invalid PSD model tag {tag} (expected 0..=4)")
            }
            ItrfError::InvalidParameters { message } => {
                write!(f, "Invalid PSD model parameters: {message}")
            }
            ItrfError::InvalidEllipsoid { message } => {
                write!(f, "Invalid ellipsoid: {message}")
            }
            ItrfError::Domain { message } => write!(f, "Numeric domain error: {message}"),
            ItrfError::Usage { message } => write!(f, "{message}"),
        }
    }
}

impl std::fmt::Debug for ItrfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ItrfError({self})")
    }
}

impl std::error::Error for ItrfError {}
