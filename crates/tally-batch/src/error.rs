//! # Batch Error Types
//!
//! Error types for loading sources and writing outputs.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / csv::Error / ValidationError / toml::de::Error       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BatchError (this module) ← Adds the file path and line                │
//! │       │                                                                 │
//! │       ├──► CLI: printed through anyhow, non-zero exit                  │
//! │       │                                                                 │
//! │       └──► ApiError (HTTP app) ← Serialized as {code, message}         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any of these aborts the whole batch. Sales that fail a business rule are
//! never errors: they come back as rejected outcomes.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Batch operation errors.
#[derive(Debug, Error)]
pub enum BatchError {
    /// An input file does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// A row or field could not be decoded or failed validation.
    ///
    /// ## When This Occurs
    /// - Missing column in the header
    /// - Price that is not a decimal number
    /// - Zero or negative quantity, negative stock
    #[error("Parse error in {} at line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// Reading a file failed for a reason other than absence.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing an output file failed.
    #[error("Failed to write {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    /// Invalid run configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl BatchError {
    /// Creates a FileNotFound error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        BatchError::FileNotFound { path: path.into() }
    }

    /// Creates a Parse error for a 1-based source line.
    pub fn parse(path: impl Into<PathBuf>, line: u64, message: impl Into<String>) -> Self {
        BatchError::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Creates a Write error.
    pub fn write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        BatchError::Write {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Maps an error from opening or reading `path`.
    ///
    /// ## Error Mapping
    /// ```text
    /// io::ErrorKind::NotFound → BatchError::FileNotFound
    /// Other                   → BatchError::Io
    /// ```
    pub fn from_io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            BatchError::not_found(path)
        } else {
            BatchError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

impl From<toml::de::Error> for BatchError {
    fn from(err: toml::de::Error) -> Self {
        BatchError::Config(err.to_string())
    }
}

/// Result type for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_not_found() {
        let err = BatchError::from_io(
            Path::new("ventas.csv"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, BatchError::FileNotFound { .. }));
        assert_eq!(err.to_string(), "File not found: ventas.csv");

        let err = BatchError::from_io(
            Path::new("ventas.csv"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert!(matches!(err, BatchError::Io { .. }));
    }

    #[test]
    fn test_parse_message_names_file_and_line() {
        let err = BatchError::parse("productos.csv", 4, "price has invalid format");
        assert_eq!(
            err.to_string(),
            "Parse error in productos.csv at line 4: price has invalid format"
        );
    }
}
